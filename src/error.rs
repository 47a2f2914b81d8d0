//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::constants::messages;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Invalid content type")]
    InvalidContentType,

    #[error("Request too large")]
    PayloadTooLarge,

    #[error("{0}")]
    Validation(String),

    // Rate limiting
    #[error("Please wait before submitting again")]
    TooManyRequests,

    // Conflicts
    #[error("Username already taken")]
    UsernameTaken,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    /// An internal failure reported to the client under an operation-specific message
    #[error("{message}: {source}")]
    Operation {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Shorthand for a validation failure with a fixed message
    pub fn validation(message: &str) -> Self {
        Self::Validation(message.to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidContentType | Self::Validation(_) | Self::UsernameTaken => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_) | Self::Internal(_) | Self::Operation { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the error stems from a server-side failure
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Report internal failures under `message` instead of the generic one.
    ///
    /// Client errors pass through untouched.
    pub fn with_public_message(self, message: &'static str) -> Self {
        match self {
            Self::Operation { source, .. } => Self::Operation { message, source },
            err if err.is_internal() => Self::Operation {
                message,
                source: Box::new(err),
            },
            err => err,
        }
    }

    /// The message shown to clients
    fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => messages::SERVER_ERROR.to_string(),
            Self::Operation { message, .. } => (*message).to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
            }
            AppError::Operation { message, source } => {
                tracing::error!(operation = %message, "{}", source);
            }
            _ => {
                tracing::debug!(status = %status.as_u16(), "Request rejected: {}", self);
            }
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

// Implement From for common error types
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                // The only unique index covers usernames
                if db_err.is_unique_violation() {
                    AppError::UsernameTaken
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
