use base64::{Engine, engine::general_purpose::STANDARD};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::settings::AppConfig;

/// The single admin account configured for the site.
#[derive(Clone)]
pub struct AdminCredentials {
    username: Zeroizing<String>,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: Zeroizing::new(username.to_string()),
            password: Zeroizing::new(password.to_string()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Compares both halves in constant time; neither comparison short-circuits.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

impl From<&AppConfig> for AdminCredentials {
    fn from(config: &AppConfig) -> Self {
        AdminCredentials::new(&config.admin_username, &config.admin_password)
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username.as_str())
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Decodes an `Authorization: Basic ...` header value into `(user, password)`.
pub fn decode_basic(header: &str) -> Option<(String, Zeroizing<String>)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = Zeroizing::new(STANDARD.decode(encoded.trim()).ok()?);
    let decoded = std::str::from_utf8(&decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;

    Some((user.to_string(), Zeroizing::new(pass.to_string())))
}
