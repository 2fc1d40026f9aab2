//! Task queue entity model and DTOs.

use courier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{StatusId, TaskStatus};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    #[serde(rename = "type")]
    pub task_type: String,
    /// JSON-encoded payload, kept as text so malformed input survives
    /// until the worker reports it.
    pub payload: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Decode `status_id`. `None` only if the lookup table and the enum
    /// have drifted apart.
    pub fn status(&self) -> Option<TaskStatus> {
        TaskStatus::from_id(self.status_id)
    }
}

/// DTO for enqueueing a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub task_type: String,
    pub payload: String,
}

/// Filter and pagination for task listing.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListQuery {
    pub status_id: Option<StatusId>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
