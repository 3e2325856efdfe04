use std::collections::HashMap;

use actix_web::{web, Either, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::blog_post::{NewBlogPostRequest, UpdateBlogPostRequest},
    errors::{require_param, AppError},
    use_cases::extractors::AdminSession,
    AppState,
};

/// JSON or urlencoded form body.
type Body<T> = Either<web::Json<T>, web::Form<T>>;

fn into_inner<T>(body: Body<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

#[instrument(skip(_admin, state))]
pub async fn admin_list_posts(
    _admin: AdminSession,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.admin_list().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(_admin, state))]
pub async fn admin_get_post(
    _admin: AdminSession,
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.admin_get(&slug).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_admin, state, data))]
pub async fn create_blog_post(
    _admin: AdminSession,
    state: web::Data<AppState>,
    data: Body<NewBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.blog_handler.create(into_inner(data)).await?;
    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_admin, state, data))]
pub async fn update_blog_post(
    _admin: AdminSession,
    state: web::Data<AppState>,
    data: Body<UpdateBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.blog_handler.update(into_inner(data)).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_admin, state, query))]
pub async fn delete_blog_post(
    _admin: AdminSession,
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let slug = require_param("slug", query.get("slug").map(String::as_str))?;
    let response = state.blog_handler.delete(&slug).await?;
    Ok(HttpResponse::Ok().json(response))
}
