//! Logging Infrastructure
//!
//! Structured logging setup: `RUST_LOG` wins, otherwise the configured level
//! applies to this crate and `tower_http`.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger: stdout, or daily rolling files when `log_dir` exists
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir.filter(|d| Path::new(d).is_dir()) {
        let file_appender = tracing_appender::rolling::daily(dir, "kanban-server");
        subscriber.with_ansi(false).with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}

fn default_directives(log_level: &str) -> String {
    format!("kanban_server={log_level},tower_http=info")
}
