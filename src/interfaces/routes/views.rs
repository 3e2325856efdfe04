use actix_web::web;

use crate::handlers::views;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/views")
            .route(web::post().to(views::record_view))
            .route(web::get().to(views::get_views))
    );
}
