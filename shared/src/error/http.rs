//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Duplicate names are reported as validation failures (400), not 409:
    /// clients receive them in the same `errors` array as the other field rules.
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            Self::DatabaseError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::AlreadyExists
            | Self::InvalidRequest
            | Self::ListNameExists
            | Self::CardListMissing
            | Self::TagNameExists => StatusCode::BAD_REQUEST,
        }
    }
}
