//! Error types and API error bodies

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned to clients for every system error.
///
/// Internal details are logged, never sent.
pub const SERVER_ERROR_MESSAGE: &str = "Server error, please contact an administrator";

/// Message returned for routing misses (unknown route, bad or unknown id).
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Application error with structured error code
///
/// - `message`: human-readable summary (logged for system errors)
/// - `errors`: field-level messages, one per violated rule, in check order
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Field-level validation messages
    pub errors: Vec<String>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            errors: Vec::new(),
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Messages a client sees for this error
    ///
    /// Falls back to `message` when no field-level errors were recorded.
    pub fn client_errors(&self) -> Vec<String> {
        if self.errors.is_empty() {
            vec![self.message.clone()]
        } else {
            self.errors.clone()
        }
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error carrying every violated rule
    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: errors.join("; "),
            errors,
        }
    }

    /// Create a validation error with a single rule message
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::validation(vec![msg.into()])
    }

    /// Create a validation error with a specific code (e.g. a name conflict)
    pub fn rule(code: ErrorCode, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        Self {
            code,
            message: msg.clone(),
            errors: vec![msg],
        }
    }

    /// Create a generic not found error
    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }
}

/// Error body written on the wire
///
/// ```json
/// { "errors": ["name can't be empty"] }
/// { "error": "Not found" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Rule violations (400)
    Rules { errors: Vec<String> },
    /// Single opaque message (404, 500)
    Message { error: String },
}

impl ErrorBody {
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message { error: msg.into() }
    }
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        if err.code.category() == ErrorCategory::System {
            return Self::message(SERVER_ERROR_MESSAGE);
        }
        if err.http_status() == StatusCode::NOT_FOUND {
            return Self::message(NOT_FOUND_MESSAGE);
        }
        Self::Rules {
            errors: err.client_errors(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ErrorBody::from(&self);

        // Log system errors
        if self.code.category() == ErrorCategory::System {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}
