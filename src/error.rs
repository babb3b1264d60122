use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Import Axum types for HTTP response conversion
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Structured validation errors with field-level error mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationErrors {
    Single { field: String, message: String },
    Multiple { fields: HashMap<String, String> },
}

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A validation error with field-level details.
    #[error("Validation error")]
    Validation(ValidationErrors),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// An authentication error (missing, invalid, or expired token).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rejected login credentials. Reported as 400 without distinguishing
    /// an unknown email from a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An object-storage error (upload, presign, or proxy download).
    #[error("Storage error: {0}")]
    Storage(String),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Shorthand for a single-field validation error.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Error::Validation(ValidationErrors::Single {
            field: field.to_string(),
            message: message.into(),
        })
    }
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

/// Convert custom Error to HTTP response
///
/// This implementation maps each error variant to an appropriate HTTP status code
/// and returns a JSON response with an error message and error code.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::InvalidCredentials => StatusCode::BAD_REQUEST,
            Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            Error::Validation(errors) => {
                let fields: HashMap<String, String> = match errors {
                    ValidationErrors::Single { field, message } => {
                        HashMap::from([(field, message)])
                    }
                    ValidationErrors::Multiple { fields } => fields,
                };
                serde_json::json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "fields": fields
                })
            }
            Error::NotFound(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "NOT_FOUND"
                })
            }
            Error::Authentication(msg) => {
                serde_json::json!({
                    "error": msg,
                    "code": "AUTHENTICATION_FAILED"
                })
            }
            Error::InvalidCredentials => {
                serde_json::json!({
                    "error": "Invalid credentials",
                    "code": "INVALID_CREDENTIALS"
                })
            }
            Error::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                serde_json::json!({
                    "error": "A storage error occurred",
                    "code": "STORAGE_ERROR"
                })
            }
            Error::Sqlx(e) => {
                tracing::error!("Database error: {e}");
                serde_json::json!({
                    "error": "Database error",
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                serde_json::json!({
                    "error": msg,
                    "code": "INTERNAL_ERROR"
                })
            }
            Error::Config(_) => {
                serde_json::json!({
                    "error": "Configuration error",
                    "code": "CONFIG_ERROR"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
