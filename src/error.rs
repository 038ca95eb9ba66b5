// src/error.rs

//! Unified error handling for the catalog.

use std::fmt;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The content source answered with an error or an unusable payload
    #[error("Content error for {content_type}: {message}")]
    Content {
        content_type: String,
        message: String,
    },

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request parameter could not be understood
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a content source error for a content type.
    pub fn content(content_type: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Content {
            content_type: content_type.into(),
            message: message.to_string(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

#[cfg(feature = "server")]
mod response {
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde_json::json;

    use super::AppError;

    impl AppError {
        fn status(&self) -> StatusCode {
            match self {
                AppError::NotFound(_) => StatusCode::NOT_FOUND,
                AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::Http(_) | AppError::Content { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status();
            if status.is_server_error() {
                tracing::error!("Request failed: {}", self);
            } else {
                tracing::warn!("Request rejected: {}", self);
            }

            let body = Json(json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            }));

            (status, body).into_response()
        }
    }
}
