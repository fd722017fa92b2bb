//! Application error type and its HTTP mapping.
//!
//! Successful responses are JSON; failures are plain status responses with a
//! short human-readable body. Internal details (SQL errors, connection strings)
//! are logged and never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client-side input problem (missing or malformed URL, bad JSON).
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// No unique token was found within the configured attempt bound.
    #[error("Token generation exhausted after {attempts} attempts")]
    Exhausted { attempts: usize },

    /// Backing store unreachable or rejected the statement.
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Exhausted { .. } | AppError::Storage { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation { message, .. } => message,
            AppError::NotFound { .. } => "Redirect not found".to_string(),
            AppError::Exhausted { attempts } => {
                error!(attempts, "Token space exhausted, could not create redirect");
                "Could not create redirect".to_string()
            }
            AppError::Storage { message } => {
                error!("Storage failure: {}", message);
                "Internal Server Error".to_string()
            }
            AppError::Internal { message, details } => {
                error!(%details, "Internal error: {}", message);
                "Internal Server Error".to_string()
            }
        };

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::storage(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let message = e
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, json!({ "fields": e.to_string() }))
    }
}
