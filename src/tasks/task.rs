//! Task Model Module
//!
//! Lifecycle record for one asynchronous log-generation request.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// == Task Status ==
/// Lifecycle states of a log-generation task.
///
/// Transitions run `Pending -> Running -> {Completed, Failed}`, except that a
/// task whose source file cannot be resolved fails straight from `Pending`.
/// `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Running => "RUNNING",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

// == Log Generation Task ==
/// Tracked state of one log-generation request.
///
/// `result_path` is set only when the task completes, `error_message` only
/// when it fails; a terminal task carries exactly one of the two.
#[derive(Debug, Clone)]
pub struct LogGenerationTask {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Current lifecycle state
    pub status: TaskStatus,
    /// Destination of the generated file, set on completion
    pub result_path: Option<PathBuf>,
    /// Failure description, set on failure
    pub error_message: Option<String>,
}

impl LogGenerationTask {
    /// Creates a fresh task in the `Pending` state.
    pub fn new(id: String) -> Self {
        Self {
            id,
            status: TaskStatus::Pending,
            result_path: None,
            error_message: None,
        }
    }
}
