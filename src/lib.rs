use std::time::Duration;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, limiter, mail, utils, web};

use auth::gate::AccessGate;
use limiter::rate_limiter::ClientRateLimiter;
use mail::ResendMailer;
use repositories::file_repo::{FsBlogPostRepo, InMemoryContactRepo, JsonProjectRepo};
use settings::AppConfig;
use use_cases::{
    blog::BlogPostHandler,
    contact::{ContactHandler, ContactSettings},
    projects::ProjectHandler,
    views::ViewCounter,
};

pub struct AppState {
    pub blog_handler: AppBlogHandler,
    pub project_handler: AppProjectHandler,
    pub contact_handler: AppContactHandler,
    pub view_counter: ViewCounter,
    pub access_gate: AccessGate,
    pub contact_limiter: ClientRateLimiter,
    pub trust_x_forwarded_for: bool,
    pub session_cookie_name: String,
    pub secure_cookies: bool,
}

pub type AppBlogHandler = BlogPostHandler<FsBlogPostRepo>;
pub type AppProjectHandler = ProjectHandler<JsonProjectRepo>;
pub type AppContactHandler = ContactHandler<ResendMailer, InMemoryContactRepo>;

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let blog_repo = FsBlogPostRepo::new(config.content_dir.clone(), config.site_owner.clone());
        let blog_handler = BlogPostHandler::new(blog_repo, config.site_owner.clone());

        let project_handler = ProjectHandler::new(JsonProjectRepo::new(config.projects_file.clone()));

        let contact_handler = ContactHandler::new(
            ResendMailer::from(config),
            InMemoryContactRepo::new(),
            ContactSettings::from(config),
        );

        let contact_limiter = ClientRateLimiter::new(
            config.contact_rate_limit,
            Duration::from_secs(config.contact_rate_window_secs),
        );

        AppState {
            blog_handler,
            project_handler,
            contact_handler,
            view_counter: ViewCounter::new(),
            access_gate: AccessGate::from_config(config),
            contact_limiter,
            trust_x_forwarded_for: config.trust_x_forwarded_for,
            session_cookie_name: config.session_cookie_name.clone(),
            secure_cookies: config.is_production(),
        }
    }
}
