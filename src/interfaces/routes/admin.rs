use actix_web::web;

use crate::handlers::{admin_blog, dashboard, messages, projects, session, system::admin_health_check};

/// `/admin`: service health and the session cookie.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(admin_health_check)
            .service(
                web::resource("/session")
                    .route(web::post().to(session::open_session))
                    .route(web::delete().to(session::close_session))
            )
    );
}

/// `/api/admin`: content management.
pub fn config_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(dashboard::admin_dashboard)
            .service(
                web::resource("/blog")
                    .route(web::get().to(admin_blog::admin_list_posts))
                    .route(web::post().to(admin_blog::create_blog_post))
                    .route(web::put().to(admin_blog::update_blog_post))
                    .route(web::delete().to(admin_blog::delete_blog_post))
            )
            .service(
                web::resource("/blog/{slug}")
                    .route(web::get().to(admin_blog::admin_get_post))
            )
            .service(
                web::resource("/projects")
                    .route(web::get().to(projects::admin_get_projects))
                    .route(web::post().to(projects::create_project))
                    .route(web::put().to(projects::update_project))
                    .route(web::delete().to(projects::delete_project))
            )
            .service(
                web::resource("/messages")
                    .route(web::get().to(messages::list_messages))
            )
            .service(
                web::resource("/messages/{message_id}")
                    .route(web::delete().to(messages::delete_message))
            )
            .service(
                web::resource("/messages/{message_id}/read")
                    .route(web::patch().to(messages::mark_message_read))
            )
    );
}
