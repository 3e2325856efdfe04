pub mod blog_post;
pub mod contact_me;
pub mod file_repo;
pub mod project;
