//! Repository for the `tasks` table.
//!
//! Status changes go through [`TaskRepo::update_status`], which refuses any
//! transition that [`TaskStatus::predecessors`] does not allow.

use courier_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::{StatusId, TaskStatus};
use crate::models::task::{CreateTask, Task, TaskListQuery};

/// Column list for `tasks` queries.
const COLUMNS: &str = "id, task_type, payload, status_id, created_at, updated_at";

/// Maximum page size for task listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for task listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides queue operations over the `tasks` table.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new pending task.
    pub async fn enqueue(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (task_type, payload, status_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.task_type)
            .bind(&input.payload)
            .bind(TaskStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Fetch the single oldest pending task, if any.
    ///
    /// This is a plain read: it does not claim the row. Callers mark it
    /// in-progress through [`TaskRepo::update_status`].
    pub async fn find_oldest_pending(pool: &PgPool) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE status_id = $1 \
             ORDER BY created_at ASC, id ASC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(TaskStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Move a task to `status`.
    ///
    /// Returns `false` (and changes nothing) when the task does not exist or
    /// its current status is not a legal predecessor of `status`.
    pub async fn update_status(
        pool: &PgPool,
        task_id: DbId,
        status: TaskStatus,
    ) -> Result<bool, sqlx::Error> {
        let allowed: Vec<StatusId> = status.predecessors().iter().map(|s| s.id()).collect();

        let result = sqlx::query(
            "UPDATE tasks SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND status_id = ANY($3)",
        )
        .bind(task_id)
        .bind(status.id())
        .bind(&allowed)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks, newest first, with an optional status filter.
    pub async fn list(pool: &PgPool, params: &TaskListQuery) -> Result<Vec<Task>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let query = match params.status_id {
            Some(_) => format!(
                "SELECT {COLUMNS} FROM tasks \
                 WHERE status_id = $1 \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT $2 OFFSET $3"
            ),
            None => format!(
                "SELECT {COLUMNS} FROM tasks \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT $1 OFFSET $2"
            ),
        };

        let mut q = sqlx::query_as::<_, Task>(&query);
        if let Some(status_id) = params.status_id {
            q = q.bind(status_id);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count tasks currently in `status`.
    pub async fn count_by_status(pool: &PgPool, status: TaskStatus) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE status_id = $1")
            .bind(status.id())
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
