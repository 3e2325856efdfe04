use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, path::PathBuf, str::FromStr};

use crate::constants::{DEFAULT_SITE_OWNER, SESSION_COOKIE};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_projects_file")]
    pub projects_file: PathBuf,

    #[serde(default = "default_admin_prefixes")]
    pub admin_path_prefixes: Vec<String>,

    #[serde(default = "default_session_cookie")]
    pub session_cookie_name: String,

    #[serde(default)]
    pub admin_username: String,

    #[serde(default)]
    pub admin_password: String,

    #[serde(default)]
    pub resend_api_key: String,

    #[serde(default = "default_resend_api_url")]
    pub resend_api_url: String,

    #[serde(default)]
    pub contact_to_email: String,

    #[serde(default = "default_contact_from")]
    pub contact_from_email: String,

    #[serde(default = "default_site_owner")]
    pub site_owner: String,

    #[serde(default = "default_max_attachment")]
    pub contact_max_attachment_bytes: usize,

    #[serde(default = "default_contact_rate_limit")]
    pub contact_rate_limit: u64,

    #[serde(default = "default_contact_rate_window")]
    pub contact_rate_window_secs: u64,

    #[serde(default)]
    pub trust_x_forwarded_for: bool,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-CMS".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_content_dir() -> PathBuf {
    PathBuf::from("content/blog")
}
fn default_projects_file() -> PathBuf {
    PathBuf::from("data/projects.json")
}
fn default_admin_prefixes() -> Vec<String> {
    vec!["/admin".to_string(), "/api/admin".to_string()]
}
fn default_session_cookie() -> String {
    SESSION_COOKIE.to_string()
}
fn default_resend_api_url() -> String {
    "https://api.resend.com".to_string()
}
fn default_contact_from() -> String {
    "Portfolio Contact <onboarding@resend.dev>".to_string()
}
fn default_site_owner() -> String {
    DEFAULT_SITE_OWNER.to_string()
}
fn default_max_attachment() -> usize {
    5 * 1024 * 1024
}
fn default_contact_rate_limit() -> u64 {
    5
}
fn default_contact_rate_window() -> u64 {
    60 * 60
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .with_list_parse_key("admin_path_prefixes")
                    .ignore_empty(true)
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Unprefixed names are accepted as fallbacks
        config.admin_username = fill_or_env(config.admin_username, &["APP_ADMIN_USERNAME", "ADMIN_USERNAME"]);
        config.admin_password = fill_or_env(config.admin_password, &["APP_ADMIN_PASSWORD", "ADMIN_PASSWORD"]);
        config.resend_api_key = fill_or_env(config.resend_api_key, &["APP_RESEND_API_KEY", "RESEND_API_KEY"]);
        config.contact_to_email = fill_or_env(config.contact_to_email, &["APP_CONTACT_TO_EMAIL", "PERSONAL_EMAIL"]);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.admin_username.trim().is_empty() {
            errors.push("ADMIN_USERNAME must be set");
        }
        if self.admin_password.is_empty() {
            errors.push("ADMIN_PASSWORD must be set");
        }
        if self.resend_api_key.trim().is_empty() {
            errors.push("RESEND_API_KEY must be set");
        }
        if self.contact_to_email.trim().is_empty() {
            errors.push("CONTACT_TO_EMAIL must be set");
        }
        if self.contact_rate_limit == 0 {
            errors.push("CONTACT_RATE_LIMIT must be greater than zero");
        }
        if self.admin_path_prefixes.iter().any(|p| !p.starts_with('/')) {
            errors.push("ADMIN_PATH_PREFIXES entries must start with '/'");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn fill_or_env(current: String, env_keys: &[&str]) -> String {
    if !current.trim().is_empty() {
        return current;
    }
    env_keys
        .iter()
        .find_map(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_default()
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("content_dir", &self.content_dir)
            .field("projects_file", &self.projects_file)
            .field("admin_path_prefixes", &self.admin_path_prefixes)
            .field("session_cookie_name", &self.session_cookie_name)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &self.admin_password.redact())
            .field("resend_api_key", &self.resend_api_key.redact())
            .field("resend_api_url", &self.resend_api_url)
            .field("contact_to_email", &self.contact_to_email)
            .field("contact_from_email", &self.contact_from_email)
            .field("site_owner", &self.site_owner)
            .field("contact_max_attachment_bytes", &self.contact_max_attachment_bytes)
            .field("contact_rate_limit", &self.contact_rate_limit)
            .field("contact_rate_window_secs", &self.contact_rate_window_secs)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: default_name(),
            port: 0,
            host: default_host(),
            worker_count: 1,
            cors_allowed_origins: default_cors_origins(),
            content_dir: default_content_dir(),
            projects_file: default_projects_file(),
            admin_path_prefixes: default_admin_prefixes(),
            session_cookie_name: default_session_cookie(),
            admin_username: "admin".into(),
            admin_password: "hunter2".into(),
            resend_api_key: "re_test".into(),
            resend_api_url: default_resend_api_url(),
            contact_to_email: "owner@example.com".into(),
            contact_from_email: default_contact_from(),
            site_owner: default_site_owner(),
            contact_max_attachment_bytes: default_max_attachment(),
            contact_rate_limit: default_contact_rate_limit(),
            contact_rate_window_secs: default_contact_rate_window(),
            trust_x_forwarded_for: false,
            log_format: LogFormat::Pretty,
        }
    }

    #[test]
    fn complete_config_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn missing_secrets_are_reported_together() {
        let mut config = base_config();
        config.admin_password.clear();
        config.resend_api_key.clear();

        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("ADMIN_PASSWORD"));
        assert!(message.contains("RESEND_API_KEY"));
    }

    #[test]
    fn production_rejects_wildcard_cors() {
        let mut config = base_config();
        config.env = AppEnvironment::Production;
        assert!(config.validate().is_err());

        config.cors_allowed_origins = vec!["https://example.com, https://www.example.com".into()];
        assert!(config.validate().is_ok());
        assert_eq!(config.cors_origins().len(), 2);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", base_config());
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("re_test"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
