//! API Module
//!
//! HTTP handlers and routing for the log generation REST API.
//!
//! # Endpoints
//! - `POST /logs/generate?date=YYYY-MM-DD` - Start an asynchronous generation task
//! - `GET /logs/generate/:id/status` - Poll a task's status
//! - `GET /logs/generate/:id/download` - Download a completed task's file
//! - `GET /logs/download?date=YYYY-MM-DD` - Download a log file synchronously
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
