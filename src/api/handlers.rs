//! API Handlers
//!
//! HTTP request handlers for each log generation endpoint. Handlers only
//! create task records and hand work to the dispatcher; they never wait for
//! a task to run.

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::cache::BoundedCache;
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{DateQuery, HealthResponse, TaskCreatedResponse, TaskStatusResponse};
use crate::resolver::LogFileResolver;
use crate::tasks::{run_generation, Dispatcher, GenerationContext, TaskRegistry, TaskStatus};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registry owning all task lifecycle state
    pub registry: Arc<TaskRegistry>,
    /// Bounded worker pool executing generation jobs
    pub dispatcher: Arc<Dispatcher>,
    /// Collaborators handed to each generation job
    pub generation: GenerationContext,
    /// Date -> archived log path cache for the synchronous download endpoint
    pub path_cache: Arc<RwLock<BoundedCache<chrono::NaiveDate, PathBuf>>>,
}

impl AppState {
    /// Creates application state from configuration.
    ///
    /// Creates the output directory and spawns the worker pool; must run
    /// inside a tokio runtime.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.generated_logs_dir)?;

        let resolver = Arc::new(LogFileResolver::new(
            config.log_file.clone(),
            config.archive_dir.clone(),
        ));

        let generation = GenerationContext {
            resolver,
            output_dir: config.generated_logs_dir.clone(),
            delay: Duration::from_millis(config.simulated_delay_ms),
        };

        let path_cache = BoundedCache::new(config.cache_max_entries)?;

        Ok(Self {
            registry: Arc::new(TaskRegistry::new()),
            dispatcher: Arc::new(Dispatcher::new(config.worker_count, config.queue_depth)),
            generation,
            path_cache: Arc::new(RwLock::new(path_cache)),
        })
    }
}

/// Handler for POST /logs/generate?date=YYYY-MM-DD
///
/// Creates a task, hands the generation job to the worker pool, and returns
/// 202 immediately with the task id and status URL. A rejected submission is
/// surfaced as an already-failed task rather than an unbounded wait.
pub async fn start_log_generation(
    State(state): State<AppState>,
    Query(params): Query<DateQuery>,
) -> Result<impl IntoResponse> {
    let task = state.registry.create_task();

    let registry = state.registry.clone();
    let ctx = state.generation.clone();
    let task_id = task.id.clone();
    let date = params.date;

    let submitted = state
        .dispatcher
        .try_submit(Box::pin(run_generation(registry, ctx, task_id, date)));

    if let Err(reject) = submitted {
        warn!(task_id = %task.id, %date, "Generation request rejected: {reject}");
        state
            .registry
            .set_failure_result(&task.id, format!("Generation request rejected: {reject}"))?;
    }

    let status_url = format!("/logs/generate/{}/status", task.id);
    let body = TaskCreatedResponse::new(task.id, task.status, status_url.clone());

    Ok((
        StatusCode::ACCEPTED,
        [(header::LOCATION, status_url)],
        Json(body),
    ))
}

/// Handler for GET /logs/generate/:id/status
pub async fn generation_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskStatusResponse>> {
    let task = state.registry.get_task(&id)?;

    let download_url = match task.status {
        TaskStatus::Completed => Some(format!("/logs/generate/{id}/download")),
        _ => None,
    };

    Ok(Json(TaskStatusResponse {
        status: task.status,
        error_message: task.error_message,
        download_url,
    }))
}

/// Handler for GET /logs/generate/:id/download
///
/// Serves the generated file once the task has completed. A task that is not
/// yet terminal, or that failed, yields a conflict with a distinct message.
pub async fn download_generated(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let task = state.registry.get_task(&id)?;

    match task.status {
        TaskStatus::Failed => Err(ServiceError::Conflict(format!(
            "Log generation failed: {}",
            task.error_message.unwrap_or_default()
        ))),
        TaskStatus::Pending | TaskStatus::Running => Err(ServiceError::Conflict(format!(
            "Log generation is not yet complete. Status: {}",
            task.status
        ))),
        TaskStatus::Completed => {
            let path = task.result_path.ok_or_else(|| {
                error!(task_id = %id, "Task is COMPLETED but result path is missing");
                ServiceError::Internal(
                    "Log generation completed but result file is missing".to_string(),
                )
            })?;
            serve_file(&path, "Generated log file became unreadable or was deleted").await
        }
    }
}

/// Handler for GET /logs/download?date=YYYY-MM-DD
///
/// Synchronous equivalent of generation: resolves the date directly and
/// streams the file. Resolved archive paths are cached for past dates;
/// today's file is never cached because its path covers a moving day.
/// A cached path that no longer reads is evicted and the date re-resolved,
/// so a deleted archive reports not-found instead of a stale read error.
pub async fn download_log(
    State(state): State<AppState>,
    Query(params): Query<DateQuery>,
) -> Result<Response> {
    let date = params.date;
    let today = Local::now().date_naive();

    if date < today {
        let cached = state.path_cache.write().await.get(&date).cloned();
        if let Some(path) = cached {
            match serve_file(&path, "Log file became unreadable or was deleted").await {
                Ok(response) => return Ok(response),
                Err(_) => {
                    // The archive vanished since it was cached. Drop the
                    // stale entry and fall through to a fresh resolution,
                    // which reports the file's real state.
                    warn!(path = %path.display(), "Cached log path no longer readable, re-resolving");
                    state.path_cache.write().await.remove(&date);
                }
            }
        }
    }

    let path = state.generation.resolver.resolve(date)?;
    if date < today {
        state.path_cache.write().await.put(date, path.clone());
    }

    serve_file(&path, "Log file became unreadable or was deleted").await
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Reads the file and wraps it as an attachment download.
///
/// A read failure after resolution maps to an internal error: the file
/// existed when checked and has since become unreadable.
async fn serve_file(path: &FsPath, unreadable_msg: &str) -> Result<Response> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to read log file for download");
        ServiceError::Internal(unreadable_msg.to_string())
    })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "log.log".to_string());

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
            (
                header::CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_string(),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_state() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("app.log");
        fs::write(&log_file, b"active log").unwrap();
        let archive_dir = dir.path().join("archived");
        fs::create_dir_all(&archive_dir).unwrap();

        let config = Config {
            server_port: 0,
            log_file,
            archive_dir,
            generated_logs_dir: dir.path().join("generated"),
            worker_count: 2,
            queue_depth: 4,
            cache_max_entries: 8,
            simulated_delay_ms: 0,
        };
        let state = AppState::from_config(&config).unwrap();
        (dir, state)
    }

    #[tokio::test]
    async fn test_start_generation_returns_pending_task() {
        let (_dir, state) = test_state();
        let query = DateQuery {
            date: Local::now().date_naive(),
        };

        let result = start_log_generation(State(state.clone()), Query(query)).await;
        assert!(result.is_ok());
        assert_eq!(state.registry.len(), 1);
    }

    #[tokio::test]
    async fn test_status_unknown_task_is_not_found() {
        let (_dir, state) = test_state();
        let result = generation_status(State(state), Path("missing".to_string())).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_download_before_completion_is_conflict() {
        let (_dir, state) = test_state();
        let task = state.registry.create_task();

        let result = download_generated(State(state), Path(task.id)).await;
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_download_after_failure_is_conflict_with_message() {
        let (_dir, state) = test_state();
        let task = state.registry.create_task();
        state
            .registry
            .set_failure_result(&task.id, "source missing")
            .unwrap();

        match download_generated(State(state), Path(task.id)).await {
            Err(ServiceError::Conflict(msg)) => {
                assert!(msg.contains("Log generation failed"));
                assert!(msg.contains("source missing"));
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_completed_file_gone_is_internal_error() {
        let (_dir, state) = test_state();
        let task = state.registry.create_task();
        // Completed task whose file no longer exists on disk
        state
            .registry
            .set_success_result(&task.id, PathBuf::from("/definitely/not/here.log"))
            .unwrap();

        let result = download_generated(State(state), Path(task.id)).await;
        assert!(matches!(result, Err(ServiceError::Internal(_))));
    }

    #[tokio::test]
    async fn test_sync_download_future_date_is_bad_request() {
        let (_dir, state) = test_state();
        let query = DateQuery {
            date: Local::now().date_naive().succ_opt().unwrap(),
        };

        let result = download_log(State(state), Query(query)).await;
        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_sync_download_past_without_archive_is_not_found() {
        let (_dir, state) = test_state();
        let query = DateQuery {
            date: Local::now().date_naive().pred_opt().unwrap(),
        };

        let result = download_log(State(state), Query(query)).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sync_download_past_date_is_cached() {
        let (dir, state) = test_state();
        let yesterday = Local::now().date_naive().pred_opt().unwrap();
        let archived = dir
            .path()
            .join("archived")
            .join(format!("app-{}.log", yesterday.format("%Y-%m-%d")));
        fs::write(&archived, b"archived bytes").unwrap();

        let query = DateQuery { date: yesterday };
        download_log(State(state.clone()), Query(query)).await.unwrap();

        let mut cache = state.path_cache.write().await;
        assert_eq!(cache.get(&yesterday), Some(&archived));
    }

    #[tokio::test]
    async fn test_sync_download_deleted_archive_is_not_found_despite_cache() {
        let (dir, state) = test_state();
        let yesterday = Local::now().date_naive().pred_opt().unwrap();
        let archived = dir
            .path()
            .join("archived")
            .join(format!("app-{}.log", yesterday.format("%Y-%m-%d")));
        fs::write(&archived, b"archived bytes").unwrap();

        // First request populates the cache
        let query = DateQuery { date: yesterday };
        download_log(State(state.clone()), Query(query)).await.unwrap();

        // The archive disappears behind the cache's back
        fs::remove_file(&archived).unwrap();

        let result = download_log(State(state.clone()), Query(query)).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));

        // The stale entry is gone as well
        let mut cache = state.path_cache.write().await;
        assert_eq!(cache.get(&yesterday), None);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
