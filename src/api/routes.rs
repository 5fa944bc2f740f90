//! API Routes
//!
//! Configures the Axum router with all log generation endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    download_generated, download_log, generation_status, health_handler, start_log_generation,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /logs/generate?date=YYYY-MM-DD` - Start an asynchronous generation task
/// - `GET /logs/generate/:id/status` - Poll a task's status
/// - `GET /logs/generate/:id/download` - Download a completed task's file
/// - `GET /logs/download?date=YYYY-MM-DD` - Download a log file synchronously
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/logs/generate", post(start_log_generation))
        .route("/logs/generate/:id/status", get(generation_status))
        .route("/logs/generate/:id/download", get(download_generated))
        .route("/logs/download", get(download_log))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::fs;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn create_test_app() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("app.log");
        fs::write(&log_file, b"active log").unwrap();

        let config = Config {
            server_port: 0,
            log_file,
            archive_dir: dir.path().join("archived"),
            generated_logs_dir: dir.path().join("generated"),
            worker_count: 2,
            queue_depth: 4,
            cache_max_entries: 8,
            simulated_delay_ms: 0,
        };
        let state = AppState::from_config(&config).unwrap();
        (dir, create_router(state))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_dir, app) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_without_date_is_bad_request() {
        let (_dir, app) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logs/generate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_with_malformed_date_is_bad_request() {
        let (_dir, app) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logs/generate?date=not-a-date")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_unknown_id_is_not_found() {
        let (_dir, app) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/logs/generate/unknown-id/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
