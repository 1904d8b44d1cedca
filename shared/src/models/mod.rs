//! Data models
//!
//! Plain records shared by the server and its clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod card;
pub mod list;
pub mod tag;

// Re-exports
pub use card::*;
pub use list::*;
pub use tag::*;

/// Change to a nullable column in a partial update
///
/// A field the client did not send is `Keep`; an explicit `null` is `Clear`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// Whether the column must be written
    pub fn is_write(&self) -> bool {
        !self.is_keep()
    }

    /// The value to write (`None` for both `Keep` and `Clear`)
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Keep => Patch::Keep,
            Patch::Clear => Patch::Clear,
            Patch::Set(v) => Patch::Set(f(v)),
        }
    }
}
