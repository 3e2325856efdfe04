use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::views::ViewEvent, errors::AppError, use_cases::views::ViewCounter, AppState};

#[instrument(skip(state, event))]
pub async fn record_view(
    state: web::Data<AppState>,
    event: web::Json<ViewEvent>,
) -> Result<impl Responder, AppError> {
    let slug = ViewCounter::event_slug(event.into_inner())?;

    // Only published posts are counted
    if !state.blog_handler.is_published(&slug).await? {
        return Err(AppError::NotFound("Blog post not found".to_string()));
    }

    let count = state.view_counter.increment(slug);
    Ok(HttpResponse::Ok().json(count))
}

#[instrument(skip(state, query))]
pub async fn get_views(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    let count = state.view_counter.get(query.get("slug").map(String::as_str))?;
    Ok(HttpResponse::Ok().json(count))
}
