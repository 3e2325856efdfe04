use actix_web::{get, HttpResponse, Responder};

use crate::errors::AppError;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Portfolio content API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "blog": "/api/blog",
        "projects": "/api/projects",
        "contact": "/api/contact"
    }))
}

pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("No such route".to_string()))
}
