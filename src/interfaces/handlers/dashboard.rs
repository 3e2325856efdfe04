use actix_web::{get, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    errors::AppError,
    use_cases::{dashboard::build_dashboard, extractors::AdminSession},
    AppState,
};

#[get("/dashboard")]
#[instrument(skip(admin, state))]
pub async fn admin_dashboard(
    admin: AdminSession,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    tracing::debug!("Dashboard requested via {}", admin.0.source);

    let dashboard = build_dashboard(
        &state.blog_handler,
        &state.project_handler,
        &state.contact_handler,
        &state.view_counter,
    )
    .await?;

    Ok(HttpResponse::Ok().json(dashboard))
}
