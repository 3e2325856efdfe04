use actix_web::web;

use crate::{handlers::home::{home, not_found}, settings::AppConfig};

mod admin;
mod blog;
mod body_config;
mod contact;
mod projects;
mod views;

pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    body_config::config_routes(cfg, config);

    cfg.service(home);

    cfg.configure(admin::config_routes);

    cfg.service(
        web::scope("/api")
            .configure(admin::config_api_routes)
            .configure(blog::config_routes)
            .configure(projects::config_routes)
            .configure(contact::config_routes)
            .configure(views::config_routes)
    );

    cfg.default_service(web::to(not_found));
}
