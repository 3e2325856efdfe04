use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::AdminSession, AppState};

#[instrument(skip(_admin, state))]
pub async fn list_messages(
    _admin: AdminSession,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let inbox = state.contact_handler.list_messages().await?;
    Ok(HttpResponse::Ok().json(inbox))
}

#[instrument(skip(_admin, state))]
pub async fn mark_message_read(
    _admin: AdminSession,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let message = state.contact_handler.mark_read(&message_id).await?;
    Ok(HttpResponse::Ok().json(message))
}

#[instrument(skip(_admin, state))]
pub async fn delete_message(
    _admin: AdminSession,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.contact_handler.delete_message(&message_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
