//! Response DTOs for the log generation API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::tasks::TaskStatus;

/// Response body for an accepted generation request (POST /logs/generate)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreatedResponse {
    /// Unique id of the created task
    pub task_id: String,
    /// Initial status, always `PENDING`
    pub status: TaskStatus,
    /// URL for polling the task status
    pub status_url: String,
}

impl TaskCreatedResponse {
    /// Creates a new TaskCreatedResponse
    pub fn new(task_id: impl Into<String>, status: TaskStatus, status_url: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status,
            status_url: status_url.into(),
        }
    }
}

/// Response body for a status poll (GET /logs/generate/:id/status)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusResponse {
    /// Current status of the task
    pub status: TaskStatus,
    /// Failure description, present only when the task failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Download URL, present only when the task completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_created_response_serialize() {
        let resp = TaskCreatedResponse::new("abc-123", TaskStatus::Pending, "/logs/generate/abc-123/status");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"taskId\":\"abc-123\""));
        assert!(json.contains("\"status\":\"PENDING\""));
        assert!(json.contains("\"statusUrl\""));
    }

    #[test]
    fn test_status_response_omits_absent_fields() {
        let resp = TaskStatusResponse {
            status: TaskStatus::Running,
            error_message: None,
            download_url: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"status":"RUNNING"}"#);
    }

    #[test]
    fn test_status_response_with_download_url() {
        let resp = TaskStatusResponse {
            status: TaskStatus::Completed,
            error_message: None,
            download_url: Some("/logs/generate/abc/download".to_string()),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"downloadUrl\""));
        assert!(!json.contains("errorMessage"));
    }

    #[test]
    fn test_status_response_with_error_message() {
        let resp = TaskStatusResponse {
            status: TaskStatus::Failed,
            error_message: Some("copy failed".to_string()),
            download_url: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"errorMessage\":\"copy failed\""));
        assert!(!json.contains("downloadUrl"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
