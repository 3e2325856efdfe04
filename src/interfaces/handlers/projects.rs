use std::collections::HashMap;

use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::{ProjectIdRequest, ProjectRequest},
    errors::AppError,
    use_cases::extractors::AdminSession,
    AppState,
};

const NO_STORE: &str = "no-store, no-cache, must-revalidate";

#[instrument(skip(state))]
pub async fn get_projects(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_admin, state))]
pub async fn admin_get_projects(
    _admin: AdminSession,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list().await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, NO_STORE))
        .json(projects))
}

#[instrument(skip(_admin, state, data))]
pub async fn create_project(
    _admin: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.create(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_admin, state, data))]
pub async fn update_project(
    _admin: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.update(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// The id comes from a `{id}` JSON body, or from `?id=` when there is no body.
#[instrument(skip(_admin, state, query, data))]
pub async fn delete_project(
    _admin: AdminSession,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
    data: Option<web::Json<ProjectIdRequest>>,
) -> Result<impl Responder, AppError> {
    let id = data
        .and_then(|body| body.into_inner().id)
        .filter(|id| !id.trim().is_empty())
        .or_else(|| query.get("id").cloned());

    let response = state.project_handler.delete(id).await?;
    Ok(HttpResponse::Ok().json(response))
}
