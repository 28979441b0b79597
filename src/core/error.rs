use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

/// Longest diagnostic detail echoed back to the client
pub const MAX_DETAIL_LEN: usize = 180;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// A multi-step admin operation failed part way through.
    ///
    /// `code` is the machine-readable outcome (e.g. `pdf_failed`), `step` names
    /// the stage that broke and `detail` carries a short URL-encoded diagnostic.
    #[error("{code} at {step}")]
    StepFailed {
        code: &'static str,
        step: &'static str,
        detail: Option<String>,
    },
}

impl AppError {
    pub fn step(code: &'static str, step: &'static str) -> Self {
        AppError::StepFailed {
            code,
            step,
            detail: None,
        }
    }

    pub fn step_with_detail(code: &'static str, step: &'static str, raw_detail: &str) -> Self {
        AppError::StepFailed {
            code,
            step,
            detail: Some(compact_detail(raw_detail)),
        }
    }
}

/// Truncate a diagnostic to [`MAX_DETAIL_LEN`] characters and URL-encode it.
pub fn compact_detail(raw: &str) -> String {
    let truncated: String = raw.chars().take(MAX_DETAIL_LEN).collect();
    urlencoding::encode(&truncated).into_owned()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone(), None)
            }
            AppError::StepFailed {
                code,
                step,
                ref detail,
            } => {
                tracing::error!("Operation failed: code={}, step={}", code, step);
                let mut errors = vec![code.to_string(), format!("debug={}", step)];
                if let Some(detail) = detail {
                    errors.push(format!("detail={}", detail));
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{} ({})", code, step),
                    Some(errors),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_detail_truncates_and_encodes() {
        let raw = format!("403:{}", "x".repeat(400));
        let detail = compact_detail(&raw);
        assert!(detail.starts_with("403%3A"));
        // 180 chars, one of which (':') grows to three when encoded
        assert_eq!(detail.len(), MAX_DETAIL_LEN + 2);
    }

    #[test]
    fn test_compact_detail_keeps_short_values() {
        assert_eq!(compact_detail("ok"), "ok");
        assert_eq!(compact_detail("a b"), "a%20b");
    }

    #[test]
    fn test_step_failed_status() {
        let response = AppError::step("pdf_failed", "pdf_generation").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::Conflict("slot taken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
