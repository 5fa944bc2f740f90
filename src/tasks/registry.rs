//! Task Registry Module
//!
//! Owns the map from task id to task state. The registry is the only
//! component that mutates a task's lifecycle fields; everyone else reads
//! snapshots.

use std::path::PathBuf;

use dashmap::DashMap;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::{Result, ServiceError};
use crate::tasks::task::{LogGenerationTask, TaskStatus};

// == Task Registry ==
/// Concurrent registry of log-generation tasks.
///
/// Backed by a sharded concurrent map, so operations on different task ids
/// never contend. A mutation holds the entry lock for the whole update, so
/// readers always see either the previous or the new state, never a partial
/// one. Tasks are retained for the process lifetime.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: DashMap<String, LogGenerationTask>,
}

impl TaskRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Create ==
    /// Allocates a fresh task in the `Pending` state and returns a snapshot.
    ///
    /// Ids are random v4 UUIDs, so they never repeat for the process lifetime.
    pub fn create_task(&self) -> LogGenerationTask {
        let id = Uuid::new_v4().to_string();
        let task = LogGenerationTask::new(id.clone());
        self.tasks.insert(id.clone(), task.clone());
        info!(task_id = %id, "Created log generation task");
        task
    }

    // == Get ==
    /// Returns a snapshot of the task, or `NotFound` for an unknown id.
    pub fn get_task(&self, id: &str) -> Result<LogGenerationTask> {
        self.tasks
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                warn!(task_id = %id, "Attempted to access non-existent task");
                ServiceError::NotFound(format!("Log generation task not found: {id}"))
            })
    }

    // == Update Status ==
    /// Transitions the task's status; intended for the `Pending -> Running` edge.
    ///
    /// A transition out of a terminal state is refused and logged.
    pub fn update_status(&self, id: &str, status: TaskStatus) -> Result<()> {
        let mut entry = self.entry(id)?;
        if entry.status.is_terminal() {
            warn!(
                task_id = %id,
                current = %entry.status,
                requested = %status,
                "Refusing status transition out of a terminal state"
            );
            return Ok(());
        }
        entry.status = status;
        info!(task_id = %id, %status, "Updated task status");
        Ok(())
    }

    // == Success ==
    /// Records the destination path and marks the task `Completed`.
    ///
    /// Path and status change under one entry lock, so no reader can observe
    /// `Completed` without a result path.
    pub fn set_success_result(&self, id: &str, result_path: PathBuf) -> Result<()> {
        let mut entry = self.entry(id)?;
        if entry.status.is_terminal() {
            warn!(task_id = %id, current = %entry.status, "Task already terminal, ignoring success result");
            return Ok(());
        }
        entry.result_path = Some(result_path.clone());
        entry.status = TaskStatus::Completed;
        info!(task_id = %id, path = %result_path.display(), "Task completed successfully");
        Ok(())
    }

    // == Failure ==
    /// Records the failure message and marks the task `Failed`.
    pub fn set_failure_result(&self, id: &str, error_message: impl Into<String>) -> Result<()> {
        let mut entry = self.entry(id)?;
        if entry.status.is_terminal() {
            warn!(task_id = %id, current = %entry.status, "Task already terminal, ignoring failure result");
            return Ok(());
        }
        let message = error_message.into();
        error!(task_id = %id, error = %message, "Task failed");
        entry.error_message = Some(message);
        entry.status = TaskStatus::Failed;
        Ok(())
    }

    // == Length ==
    /// Number of tasks ever created in this process.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true when no tasks have been created.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn entry(
        &self,
        id: &str,
    ) -> Result<dashmap::mapref::one::RefMut<'_, String, LogGenerationTask>> {
        self.tasks.get_mut(id).ok_or_else(|| {
            warn!(task_id = %id, "Attempted to mutate non-existent task");
            ServiceError::NotFound(format!("Log generation task not found: {id}"))
        })
    }
}
