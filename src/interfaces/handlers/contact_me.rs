use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::contact_me::{ContactAttachment, ContactForm, ContactUpload},
    errors::AppError,
    limiter::rate_limiter::RateDecision,
    utils::get_client_ip::get_client_ip,
    AppState,
};

fn enforce_rate_limit(req: &HttpRequest, state: &AppState) -> Result<(), AppError> {
    let client_ip = get_client_ip(req, state.trust_x_forwarded_for);

    match state.contact_limiter.check(&client_ip) {
        RateDecision::Allowed { remaining } => {
            tracing::debug!("Contact budget for {}: {} left", client_ip, remaining);
            Ok(())
        }
        RateDecision::Limited { retry_after_secs } => {
            tracing::warn!("Contact rate limit hit by {}", client_ip);
            Err(AppError::TooManyRequests(retry_after_secs))
        }
    }
}

async fn read_attachment(file: TempFile) -> Result<Option<ContactAttachment>, AppError> {
    let filename = file.file_name.clone().unwrap_or_default();
    if file.size == 0 && filename.trim().is_empty() {
        return Ok(None);
    }

    let bytes = tokio::fs::read(file.file.path()).await?;
    let declared = file.content_type.as_ref().map(|m| m.essence_str().to_string());

    Ok(Some(ContactAttachment::new(&filename, declared.as_deref(), bytes)))
}

#[instrument(skip(req, state, form))]
pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    enforce_rate_limit(&req, &state)?;

    let response = state.contact_handler.submit(form.into_inner(), None).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(req, state, upload))]
pub async fn submit_contact_with_attachment(
    req: HttpRequest,
    state: web::Data<AppState>,
    upload: MultipartForm<ContactUpload>,
) -> Result<impl Responder, AppError> {
    enforce_rate_limit(&req, &state)?;
    let upload = upload.into_inner();

    let attachment = match upload.file {
        Some(file) => read_attachment(file).await?,
        None => None,
    };

    let form = ContactForm {
        name: upload.name.map(|t| t.into_inner()),
        email: upload.email.map(|t| t.into_inner()),
        message: upload.message.map(|t| t.into_inner()),
    };

    let response = state.contact_handler.submit(form, attachment).await?;
    Ok(HttpResponse::Ok().json(response))
}
