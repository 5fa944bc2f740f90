//! Loggen - An asynchronous log generation server
//!
//! Runs log-generation requests as background tasks with a tracked lifecycle,
//! resolves calendar dates to active or archived log files, and caches
//! resolutions in a bounded LRU cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
