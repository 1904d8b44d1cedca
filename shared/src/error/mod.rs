//! Unified error system for the kanban service
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error type carrying a code, a message and field-level errors
//! - [`ErrorBody`]: Wire format of error responses
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: List errors
//! - 2xxx: Card errors
//! - 3xxx: Tag errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::validation(vec!["name can't be empty".to_string()]);
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE};
