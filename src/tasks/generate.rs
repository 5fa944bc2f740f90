//! Generation Job Module
//!
//! Drives one log-generation task through its state machine: resolve the
//! source file, mark the task running, copy the bytes to the output
//! directory, and record the terminal outcome. Always runs on a dispatcher
//! worker, never on the request path.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::resolver::{LogFileResolver, ResolveError, LOG_DATE_FORMAT};
use crate::tasks::registry::TaskRegistry;
use crate::tasks::task::TaskStatus;

/// Task-id prefix length used in generated file names.
const TASK_ID_PREFIX_LEN: usize = 8;

// == Generation Error ==
/// Failure classes of the asynchronous generation work.
#[derive(Error, Debug)]
enum GenerationError {
    #[error("Source log file not found or not accessible for date {date}: {source}")]
    SourceUnavailable {
        date: NaiveDate,
        source: ResolveError,
    },

    #[error("Failed to copy log file content: {0}")]
    CopyFailed(std::io::Error),

    #[error("Task was interrupted")]
    Interrupted,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

// == Generation Context ==
/// Shared collaborators and settings a generation job needs.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Maps the requested date to a source log file
    pub resolver: Arc<LogFileResolver>,
    /// Directory generated copies are written to
    pub output_dir: PathBuf,
    /// Artificial delay before copying (placeholder for real work)
    pub delay: Duration,
}

// == Run Generation ==
/// Executes one generation task to its terminal state.
///
/// Source resolution happens before the task is marked running; a resolution
/// failure therefore fails the task straight from `Pending`. The copy phase
/// runs in its own spawned task so a panic or cancellation still produces a
/// terminal `Failed` state instead of a task stuck in `Running`.
pub async fn run_generation(
    registry: Arc<TaskRegistry>,
    ctx: GenerationContext,
    task_id: String,
    date: NaiveDate,
) {
    debug!(task_id = %task_id, %date, "Generation job started");

    let source = match ctx.resolver.resolve(date) {
        Ok(path) => path,
        Err(err) => {
            let failure = GenerationError::SourceUnavailable { date, source: err };
            let _ = registry.set_failure_result(&task_id, failure.to_string());
            return;
        }
    };
    info!(task_id = %task_id, source = %source.display(), "Source log file located");

    if registry
        .update_status(&task_id, TaskStatus::Running)
        .is_err()
    {
        return;
    }

    let work = tokio::spawn(copy_log_file(
        source,
        ctx.output_dir,
        date,
        task_prefix(&task_id),
        ctx.delay,
    ));

    match work.await {
        Ok(Ok(destination)) => {
            let _ = registry.set_success_result(&task_id, destination);
        }
        Ok(Err(failure)) => {
            let _ = registry.set_failure_result(&task_id, failure.to_string());
        }
        Err(join_err) if join_err.is_cancelled() => {
            let _ = registry.set_failure_result(&task_id, GenerationError::Interrupted.to_string());
        }
        Err(join_err) => {
            let failure = GenerationError::Unexpected(join_err.to_string());
            let _ = registry.set_failure_result(&task_id, failure.to_string());
        }
    }
}

/// The slow part of the job: optional delay, then a byte-for-byte copy into
/// a destination named from the date and the task-id prefix, so concurrent
/// tasks for the same date never collide.
async fn copy_log_file(
    source: PathBuf,
    output_dir: PathBuf,
    date: NaiveDate,
    id_prefix: String,
    delay: Duration,
) -> Result<PathBuf, GenerationError> {
    if !delay.is_zero() {
        debug!(?delay, "Simulating work before copy");
        tokio::time::sleep(delay).await;
    }

    let file_name = format!(
        "generated_log_{}_{}.log",
        date.format(LOG_DATE_FORMAT),
        id_prefix
    );
    let destination = output_dir.join(file_name);

    tokio::fs::copy(&source, &destination)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::Interrupted => GenerationError::Interrupted,
            _ => GenerationError::CopyFailed(e),
        })?;

    info!(
        source = %source.display(),
        destination = %destination.display(),
        "Copied log file content"
    );
    Ok(destination)
}

fn task_prefix(task_id: &str) -> String {
    task_id.chars().take(TASK_ID_PREFIX_LEN).collect()
}
