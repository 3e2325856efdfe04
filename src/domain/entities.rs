pub mod blog_post;
pub mod contact_me;
pub mod dashboard;
pub mod list_input;
pub mod project;
pub mod views;
