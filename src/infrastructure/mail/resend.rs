use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use zeroize::Zeroizing;

use super::{MailError, Mailer, OutgoingEmail};
use crate::settings::AppConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Sends email through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_url: String,
    api_key: Zeroizing<String>,
}

impl ResendMailer {
    pub fn new(api_url: &str, api_key: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: Zeroizing::new(api_key.to_string()),
        }
    }
}

impl From<&AppConfig> for ResendMailer {
    fn from(config: &AppConfig) -> Self {
        ResendMailer::new(&config.resend_api_url, &config.resend_api_key)
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    #[instrument(skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError> {
        let response = self.client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(self.api_key.as_str())
            .json(email)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected { status: status.as_u16(), body });
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| MailError::InvalidResponse(e.to_string()))?;

        tracing::debug!("Email accepted by provider: {}", sent.id);
        Ok(sent.id)
    }
}
