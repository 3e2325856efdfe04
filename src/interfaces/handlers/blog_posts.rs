use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn get_published_posts(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.list_published().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state))]
pub async fn get_published_post(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.get_published_post(&slug).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(state))]
pub async fn get_posts_by_tag(
    tag: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.posts_by_tag(tag.trim()).await?;
    Ok(HttpResponse::Ok().json(posts))
}
