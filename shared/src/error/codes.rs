//! Unified error codes for the kanban service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: List errors
//! - 2xxx: Card errors
//! - 3xxx: Tag errors
//! - 9xxx: System errors

use std::fmt;

/// Unified error code enum
///
/// The code is logged with system errors; clients only see the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: List ====================
    /// List name already used by another list
    ListNameExists = 1002,

    // ==================== 2xxx: Card ====================
    /// The list a card points to does not exist
    CardListMissing = 2002,

    // ==================== 3xxx: Tag ====================
    /// Tag name already used by another tag
    TagNameExists = 3002,

    // ==================== 9xxx: System ====================
    DatabaseError = 9002,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            ErrorCode::ListNameExists => "This name of list is already in use",
            ErrorCode::CardListMissing => "The list of the card does not exist",
            ErrorCode::TagNameExists => "This name of tag is already in use",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
