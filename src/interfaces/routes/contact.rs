use actix_web::{guard, http::header, web};

use crate::handlers::contact_me;

fn is_multipart(ctx: &guard::GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact")
            .route(
                web::post()
                    .guard(guard::fn_guard(is_multipart))
                    .to(contact_me::submit_contact_with_attachment)
            )
            .route(web::post().to(contact_me::submit_contact))
    );
}
