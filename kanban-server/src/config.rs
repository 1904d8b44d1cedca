//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | (必填) | SQLite 连接串, e.g. `sqlite:kanban.db` |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | DB_MAX_CONNECTIONS | 5 | 连接池大小 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录, 设置后按天滚动写文件 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=sqlite:kanban.db HTTP_PORT=8080 cargo run -p kanban-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection string
    pub database_url: String,
    /// HTTP API port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Pool size for the store
    pub db_max_connections: u32,
    /// Default log filter level
    pub log_level: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .ok_or("DATABASE_URL must be set")?;

        Ok(Self {
            database_url,
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|p| p.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
        })
    }

    /// Configuration for tests: private in-memory store, random port
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "test".into(),
            db_max_connections: 1,
            log_level: "debug".into(),
            log_dir: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
