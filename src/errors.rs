use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::{self, ContentType}, StatusCode},
    HttpResponse
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::{constants::ADMIN_REALM, mail::MailError};

#[derive(Debug)]
pub enum AppError {
    MissingField(String),
    MissingParameter(String),
    ValidationError(Vec<FieldError>),
    InvalidInput(String),
    UnauthorizedAccess,
    NotFound(String),
    Conflict(String),
    TooManyRequests(u64),
    Storage(String),
    EmailDelivery(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingField(field) => write!(f, "Missing required field: {}", field),
            AppError::MissingParameter(param) => write!(f, "Missing parameter: {}", param),
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Validation failed: {}", messages)
            }
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::UnauthorizedAccess => write!(f, "Authentication required"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::TooManyRequests(_) => write!(f, "Too many requests"),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::EmailDelivery(msg) => write!(f, "Email delivery failed: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => serde_json::json!({
                "error": self.to_string(),
                "details": errors
            }),
            // Storage details carry file paths; they stay in the logs.
            AppError::Storage(detail) => {
                tracing::error!("Storage failure: {}", detail);
                serde_json::json!({"error": "Internal server error"})
            }
            AppError::EmailDelivery(detail) => {
                tracing::error!("Email delivery failure: {}", detail);
                serde_json::json!({"error": "Failed to send email"})
            }
            _ => serde_json::json!({"error": self.to_string()}),
        };

        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(ContentType::json());

        match self {
            AppError::UnauthorizedAccess => {
                builder.insert_header((
                    header::WWW_AUTHENTICATE,
                    format!("Basic realm=\"{}\"", ADMIN_REALM),
                ));
            }
            AppError::TooManyRequests(retry_after) => {
                builder.insert_header((header::RETRY_AFTER, retry_after.to_string()));
            }
            _ => {}
        }

        builder.json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_)
            | AppError::MissingParameter(_)
            | AppError::ValidationError(_)
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthorizedAccess => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Storage(_) | AppError::EmailDelivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(format!("JSON document error: {}", err))
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::EmailDelivery(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Returns the value when it is present and not blank.
pub fn require_field(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::MissingField(field.to_string())),
    }
}

/// Same as [`require_field`] for query-string parameters.
pub fn require_param(param: &str, value: Option<&str>) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::MissingParameter(param.to_string())),
    }
}
