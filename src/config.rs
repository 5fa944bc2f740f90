//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path to the active log file
    pub log_file: PathBuf,
    /// Directory holding archived per-date log files
    pub archive_dir: PathBuf,
    /// Directory where generated log copies are written
    pub generated_logs_dir: PathBuf,
    /// Number of generation workers in the pool
    pub worker_count: usize,
    /// Maximum number of pending generation jobs
    pub queue_depth: usize,
    /// Maximum number of entries in the resolved-path cache
    pub cache_max_entries: usize,
    /// Artificial delay before copying, in milliseconds (placeholder for real work)
    pub simulated_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `LOG_FILE` - Active log file path (default: ./logs/app.log)
    /// - `ARCHIVE_DIR` - Archived logs directory (default: `archived` next to the log file)
    /// - `GENERATED_LOGS_DIR` - Output directory for generated copies (default: ./generated-logs)
    /// - `WORKER_COUNT` - Generation worker pool size (default: 3)
    /// - `QUEUE_DEPTH` - Pending generation job capacity (default: 10)
    /// - `CACHE_MAX_ENTRIES` - Resolved-path cache capacity (default: 50)
    /// - `SIMULATED_DELAY_MS` - Artificial per-task delay (default: 0)
    pub fn from_env() -> Self {
        let log_file = env::var("LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./logs/app.log"));

        let archive_dir = env::var("ARCHIVE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_archive_dir(&log_file));

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            log_file,
            archive_dir,
            generated_logs_dir: env::var("GENERATED_LOGS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./generated-logs")),
            worker_count: env::var("WORKER_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            queue_depth: env::var("QUEUE_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            simulated_delay_ms: env::var("SIMULATED_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let log_file = PathBuf::from("./logs/app.log");
        let archive_dir = default_archive_dir(&log_file);
        Self {
            server_port: 3000,
            log_file,
            archive_dir,
            generated_logs_dir: PathBuf::from("./generated-logs"),
            worker_count: 3,
            queue_depth: 10,
            cache_max_entries: 50,
            simulated_delay_ms: 0,
        }
    }
}

/// Archived logs live in an `archived` directory next to the active log file.
fn default_archive_dir(log_file: &PathBuf) -> PathBuf {
    match log_file.parent() {
        Some(parent) => parent.join("archived"),
        None => PathBuf::from("archived"),
    }
}
