//! Indexing task models.
//!
//! A task is a handle to an in-flight indexing job on the external
//! video-understanding service. The service owns the status; this side
//! only polls and reads it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Indexing task status as reported by the external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task accepted, not yet indexing
    #[default]
    Pending,
    /// Video is being indexed
    Indexing,
    /// Indexing finished, video is searchable
    Ready,
    /// Indexing failed on the service side
    Failed,
    /// Status string this client does not recognize; treated as in-flight
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Indexing => "indexing",
            TaskStatus::Ready => "ready",
            TaskStatus::Failed => "failed",
            TaskStatus::Unknown => "unknown",
        }
    }

    /// Check if this is a terminal state (no more polling needed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Ready | TaskStatus::Failed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle to an in-flight indexing job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisTask {
    /// Opaque task identifier from the external service
    pub task_id: String,
    /// Current task status (polled)
    pub status: TaskStatus,
    /// Video identifier, populated once the task reaches `ready`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl AnalysisTask {
    /// Create a handle for a freshly submitted task.
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: TaskStatus::Pending,
            video_id: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_ready(&self) -> bool {
        self.status == TaskStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_pending() {
        let task = AnalysisTask::new("task-1");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(!task.is_terminal());
        assert!(task.video_id.is_none());
    }

    #[test]
    fn test_terminal_states() {
        assert!(TaskStatus::Ready.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Indexing.is_terminal());
        assert!(!TaskStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_unrecognized_status_decodes_as_unknown() {
        let status: TaskStatus = serde_json::from_str("\"validating\"").unwrap();
        assert_eq!(status, TaskStatus::Unknown);
    }

    #[test]
    fn test_status_snake_case_wire_format() {
        assert_eq!(serde_json::to_string(&TaskStatus::Ready).unwrap(), "\"ready\"");
        let status: TaskStatus = serde_json::from_str("\"indexing\"").unwrap();
        assert_eq!(status, TaskStatus::Indexing);
    }
}
