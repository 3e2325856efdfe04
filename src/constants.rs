use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// File extension of blog content files.
pub const POST_EXTENSION: &str = "mdx";

pub const DEFAULT_POST_TITLE: &str = "Untitled";
pub const DEFAULT_READ_TIME: &str = "5 min read";
pub const DEFAULT_SITE_OWNER: &str = "Site Owner";

pub const SESSION_COOKIE: &str = "admin-session";
pub const ADMIN_REALM: &str = "Admin Area - Secure Access";
