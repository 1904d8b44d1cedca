//! Repository Module
//!
//! CRUD operations over the SQLite pool. Every function takes `&SqlitePool`
//! and returns `RepoResult`; handlers convert failures into `AppError`.

pub mod card;
pub mod card_tag;
pub mod list;
pub mod tag;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".into()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(_) => AppError::not_found(),
            RepoError::Duplicate(msg) => AppError::rule(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::invalid(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Translate constraint violations raised by a write
///
/// `on_unique` / `on_foreign_key` build the client-facing error; anything
/// else stays a database error.
pub(crate) fn map_constraint(
    err: sqlx::Error,
    on_unique: impl FnOnce() -> RepoError,
    on_foreign_key: impl FnOnce() -> RepoError,
) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_foreign_key_violation() {
            return on_foreign_key();
        }
    }
    err.into()
}

/// Encode ids as a JSON array for `json_each(?)` binds
pub(crate) fn id_array(ids: &[i64]) -> String {
    serde_json::Value::from(ids.to_vec()).to_string()
}
