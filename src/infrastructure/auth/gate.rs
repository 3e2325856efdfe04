use actix_web::{HttpRequest, http::header};
use derive_more::Display;
use serde::Serialize;

use super::credentials::{AdminCredentials, decode_basic};
use crate::settings::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum GrantSource {
    #[display("session_cookie")]
    SessionCookie,
    #[display("basic_auth")]
    BasicAuth,
}

/// Inserted into request extensions once the gate lets a request through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub source: GrantSource,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Grant(AdminIdentity),
    Pass,
}

/// One link in the gate's credential chain.
pub trait CredentialSource: Send + Sync {
    fn inspect(&self, req: &HttpRequest) -> GateDecision;
}

/// Grants on a non-empty session cookie.
pub struct SessionCookieSource {
    cookie_name: String,
}

impl SessionCookieSource {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self { cookie_name: cookie_name.into() }
    }
}

impl CredentialSource for SessionCookieSource {
    fn inspect(&self, req: &HttpRequest) -> GateDecision {
        match req.cookie(&self.cookie_name) {
            Some(cookie) if !cookie.value().trim().is_empty() => GateDecision::Grant(AdminIdentity {
                source: GrantSource::SessionCookie,
                username: None,
            }),
            _ => GateDecision::Pass,
        }
    }
}

pub struct BasicAuthSource {
    credentials: AdminCredentials,
}

impl BasicAuthSource {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }
}

impl CredentialSource for BasicAuthSource {
    fn inspect(&self, req: &HttpRequest) -> GateDecision {
        let Some((user, pass)) = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(decode_basic)
        else {
            return GateDecision::Pass;
        };

        if self.credentials.matches(&user, &pass) {
            GateDecision::Grant(AdminIdentity {
                source: GrantSource::BasicAuth,
                username: Some(user),
            })
        } else {
            tracing::warn!("Rejected basic credentials for user '{}'", user);
            GateDecision::Pass
        }
    }
}

pub struct AccessGate {
    prefixes: Vec<String>,
    sources: Vec<Box<dyn CredentialSource>>,
}

impl AccessGate {
    pub fn new(prefixes: Vec<String>, sources: Vec<Box<dyn CredentialSource>>) -> Self {
        let prefixes = prefixes
            .into_iter()
            .map(|p| p.trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { prefixes, sources }
    }

    /// Session cookie first, then Basic credentials.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.admin_path_prefixes.clone(),
            vec![
                Box::new(SessionCookieSource::new(config.session_cookie_name.clone())),
                Box::new(BasicAuthSource::new(AdminCredentials::from(config))),
            ],
        )
    }

    /// True when `path` is one of the prefixes or lies beneath one.
    pub fn guards(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            path.strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    /// First grant from the chain, if any.
    pub fn authorize(&self, req: &HttpRequest) -> Option<AdminIdentity> {
        self.sources.iter().find_map(|source| match source.inspect(req) {
            GateDecision::Grant(identity) => Some(identity),
            GateDecision::Pass => None,
        })
    }
}
