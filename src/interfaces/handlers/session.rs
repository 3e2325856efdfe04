use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web, HttpResponse, Responder,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{use_cases::extractors::AdminSession, AppState};

const SESSION_MAX_AGE_HOURS: i64 = 12;

/// Issues the session cookie to a caller that already passed the gate.
#[instrument(skip(admin, state))]
pub async fn open_session(
    admin: AdminSession,
    state: web::Data<AppState>,
) -> impl Responder {
    let cookie = Cookie::build(state.session_cookie_name.clone(), Uuid::new_v4().to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.secure_cookies)
        .max_age(CookieDuration::hours(SESSION_MAX_AGE_HOURS))
        .finish();

    tracing::info!("Admin session opened via {}", admin.0.source);
    HttpResponse::Ok().cookie(cookie).json(serde_json::json!({
        "success": true,
        "message": "Session started"
    }))
}

#[instrument(skip(_admin, state))]
pub async fn close_session(
    _admin: AdminSession,
    state: web::Data<AppState>,
) -> impl Responder {
    let mut cookie = Cookie::build(state.session_cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.secure_cookies)
        .finish();
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(serde_json::json!({
        "success": true,
        "message": "Session ended"
    }))
}
