use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::{errors::AppError, settings::AppConfig};

const BODY_LIMIT: usize = 2 * 1024 * 1024;
const MULTIPART_FIELD_LIMIT: usize = 256 * 1024;
/// Headroom above the attachment limit for the text fields and part headers.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Extractor limits, with every rejection rendered as a 400 `{error}` body.
pub fn config_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    cfg.app_data(web::PayloadConfig::new(BODY_LIMIT))
        .app_data(
            web::JsonConfig::default()
                .limit(BODY_LIMIT)
                .error_handler(|err, _req| AppError::InvalidInput(format!("JSON payload error: {}", err)).into()),
        )
        .app_data(
            web::FormConfig::default()
                .limit(BODY_LIMIT)
                .error_handler(|err, _req| AppError::InvalidInput(format!("Form payload error: {}", err)).into()),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _req| AppError::InvalidInput(format!("Query string error: {}", err)).into()),
        )
        .app_data(
            MultipartFormConfig::default()
                .total_limit(config.contact_max_attachment_bytes.saturating_add(MULTIPART_OVERHEAD))
                .memory_limit(MULTIPART_FIELD_LIMIT)
                .error_handler(|err, _req| AppError::InvalidInput(format!("Multipart payload error: {}", err)).into()),
        );
}
