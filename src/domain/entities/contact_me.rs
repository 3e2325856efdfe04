use std::borrow::Cow;

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    errors::{require_field, AppError},
    mail::EmailAttachment,
};

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern")
});

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ───── Input ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Multipart variant of the contact form, with an optional `file` part.
#[derive(MultipartForm)]
pub struct ContactUpload {
    pub name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub message: Option<Text<String>>,
    pub file: Option<TempFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Validate)]
pub struct ContactSubmission {
    #[validate(length(max = 200, message = "Name is too long"))]
    pub name: String,

    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,

    #[validate(length(max = 10000, message = "Message is too long"))]
    pub message: String,

    pub attachment: Option<ContactAttachment>,
}

impl ContactForm {
    pub fn into_submission(self, attachment: Option<ContactAttachment>) -> Result<ContactSubmission, AppError> {
        let submission = ContactSubmission {
            name: require_field("name", self.name)?.trim().to_string(),
            email: require_field("email", self.email)?.trim().to_string(),
            message: require_field("message", self.message)?.trim().to_string(),
            attachment,
        };

        submission.validate()?;
        Ok(submission)
    }
}

impl ContactAttachment {
    /// Sniffs the content type from the bytes, falling back to the declared one.
    pub fn new(filename: &str, declared_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let content_type = infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .or_else(|| declared_type.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let filename = filename.trim();
        Self {
            filename: if filename.is_empty() { "attachment".to_string() } else { filename.to_string() },
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn info(&self) -> AttachmentInfo {
        AttachmentInfo {
            filename: self.filename.clone(),
            size: self.size(),
            content_type: self.content_type.clone(),
        }
    }

    pub fn to_email_attachment(&self) -> EmailAttachment {
        EmailAttachment {
            filename: self.filename.clone(),
            content: STANDARD.encode(&self.bytes),
        }
    }
}

pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if EMAIL_SHAPE.is_match(email) {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_email");
    err.message = Some(Cow::Borrowed("Invalid email address"));
    Err(err)
}

// ───── Inbox ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInfo {
    pub filename: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentInfo>,
    pub received_at: DateTime<Utc>,
    pub delivered: bool,
    pub read: bool,
}

impl ContactMessage {
    pub fn record(submission: &ContactSubmission, delivered: bool) -> Self {
        ContactMessage {
            id: Uuid::new_v4(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
            attachment: submission.attachment.as_ref().map(ContactAttachment::info),
            received_at: Utc::now(),
            delivered,
            read: false,
        }
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub message: String,
    pub notification_id: String,
    pub auto_responder_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactMessageListResponse {
    pub messages: Vec<ContactMessage>,
    pub total: usize,
    pub unread: usize,
}
