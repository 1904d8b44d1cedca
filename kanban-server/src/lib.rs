//! kanban-server: REST API for lists, cards and tags
//!
//! - Lists are ordered by `position` and own their cards
//! - Cards are ordered inside their list and carry many tags
//! - Writes are validated and sanitized before they reach SQLite

pub mod api;
pub mod config;
pub mod db;
pub mod logger;
pub mod sanitize;
pub mod state;
pub mod validation;

pub use config::Config;
pub use state::AppState;
