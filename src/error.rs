//! Error types for the log generation server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Service Error Enum ==
/// Unified error type for the log generation server.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Task or log file not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data reaching the core
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Invalid argument to a component constructor
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not valid in the current task state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServiceError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ServiceError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the log generation server.
pub type Result<T> = std::result::Result<T, ServiceError>;
