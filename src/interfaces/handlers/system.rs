use actix_web::{web, get, HttpResponse, Responder};
use humantime::format_duration;
use chrono::Utc;
use std::time::Duration;
use serde::Serialize;
use crate::{
    constants::START_TIME,
    repositories::{blog_post::BlogPostRepository, project::ProjectRepository},
    use_cases::extractors::AdminSession,
    AppState,
};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    start_at: String,
    version: String,
    content_dir: String,
    projects_file: String,
    tracked_clients: usize,
}

fn storage_status<E: std::fmt::Display>(result: Result<(), E>, what: &str) -> String {
    match result {
        Ok(()) => "OK".to_string(),
        Err(e) => {
            tracing::warn!("{} unavailable: {}", what, e);
            "Unavailable".to_string()
        }
    }
}

#[get("/health")]
pub async fn admin_health_check(
    _admin: AdminSession,
    state: web::Data<AppState>,
) -> impl Responder {
    let now_utc = Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let content_dir = storage_status(
        state.blog_handler.blog_post_repo.check_storage().await,
        "Content directory",
    );
    let projects_file = storage_status(
        state.project_handler.project_repo.check_storage().await,
        "Projects document",
    );

    let status = if content_dir == "OK" && projects_file == "OK" { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: status.to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        content_dir,
        projects_file,
        tracked_clients: state.contact_limiter.tracked_clients(),
    })
}
