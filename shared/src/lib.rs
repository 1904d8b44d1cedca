//! Shared types for the kanban service
//!
//! Plain data records (lists, cards, tags), their create/update payloads and
//! the unified error type used by the HTTP layer.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCode};
pub use models::{Card, List, Patch, Tag};
