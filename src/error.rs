//! Error taxonomy for the service and its HTTP mapping
//!
//! Validation failures carry a short message meant for the client. Internal
//! failures carry a detailed message that is logged and never sent back.

use axum::{
    extract::rejection::{BytesRejection, FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::validation::MAX_ALIAS_LENGTH;

/// Message returned to clients for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The `url` field was absent or blank
    #[error("URL is required")]
    MissingUrl,

    /// The destination is not an absolute http(s) URL with a host
    #[error("Invalid URL format. Please include http:// or https://")]
    InvalidUrl,

    /// The requested alias breaks the length or character rules
    #[error("{0}")]
    InvalidAlias(AliasViolation),

    #[error("Alias already taken")]
    AliasTaken,

    /// No mapping exists for the requested token
    #[error("URL not found")]
    NotFound,

    /// The request body could not be read or decoded
    #[error("{message}")]
    MalformedRequest { status: StatusCode, message: String },

    /// I/O or encoding failure; the detail is for the log only
    #[error("internal error: {0}")]
    Internal(String),
}

/// Why an alias was rejected
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasViolation {
    #[error("Alias must be at most {max} characters", max = MAX_ALIAS_LENGTH)]
    TooLong,

    #[error("Alias can only contain letters, numbers, hyphens, and underscores")]
    Characters,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingUrl
            | AppError::InvalidUrl
            | AppError::InvalidAlias(_)
            | AppError::AliasTaken => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MalformedRequest { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            // Redirect misses answer in plain text, like any unknown page
            AppError::NotFound => (status, "URL not found").into_response(),
            AppError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                (status, Json(json!({ "error": INTERNAL_ERROR_MESSAGE }))).into_response()
            }
            other => {
                tracing::debug!(status = %status, error = %other, "request rejected");
                (status, Json(json!({ "error": other.to_string() }))).into_response()
            }
        }
    }
}
