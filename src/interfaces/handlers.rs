pub mod admin_blog;
pub mod blog_posts;
pub mod contact_me;
pub mod dashboard;
pub mod home;
pub mod messages;
pub mod projects;
pub mod session;
pub mod system;
pub mod views;
