//! Application state shared by every handler

use std::sync::Arc;

use shared::AppError;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::DbService;
use crate::sanitize::HtmlSanitizer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Cleaner applied to text fields before they are stored
    pub sanitizer: Arc<HtmlSanitizer>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Open the configured database (running migrations) and build the state
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = DbService::connect(&config.database_url, config.db_max_connections).await?;
        Ok(Self::with_pool(db.pool, config.clone()))
    }

    /// State over a private in-memory database
    pub async fn in_memory() -> Result<Self, AppError> {
        let db = DbService::memory().await?;
        Ok(Self::with_pool(db.pool, Config::in_memory()))
    }

    pub fn with_pool(pool: SqlitePool, config: Config) -> Self {
        Self {
            pool,
            sanitizer: Arc::new(HtmlSanitizer::new()),
            config: Arc::new(config),
        }
    }
}
