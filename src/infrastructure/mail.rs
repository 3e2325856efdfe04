use async_trait::async_trait;
use derive_more::Display;
use serde::Serialize;

pub mod resend;

pub use resend::ResendMailer;

/// A file attached to an outgoing email. `content` is base64.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display("Mail transport error: {_0}")]
    Transport(String),

    #[display("Mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[display("Unexpected mail provider response: {_0}")]
    InvalidResponse(String),
}

/// Hands an email to a delivery provider and returns the provider's message id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailError>;
}
