//! Queue storage seam.

use async_trait::async_trait;
use courier_core::types::DbId;
use courier_db::models::status::TaskStatus;
use courier_db::models::task::Task;
use courier_db::repositories::TaskRepo;
use courier_db::DbPool;

/// The two storage operations the worker loop needs.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// The single oldest pending task, if any.
    async fn fetch_oldest_pending(&self) -> Result<Option<Task>, sqlx::Error>;

    /// Move a task to `status`; `false` if the transition did not apply.
    async fn update_status(&self, task_id: DbId, status: TaskStatus) -> Result<bool, sqlx::Error>;
}

/// [`TaskStore`] backed by the `tasks` table.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: DbPool,
}

impl PgTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn fetch_oldest_pending(&self) -> Result<Option<Task>, sqlx::Error> {
        TaskRepo::find_oldest_pending(&self.pool).await
    }

    async fn update_status(&self, task_id: DbId, status: TaskStatus) -> Result<bool, sqlx::Error> {
        TaskRepo::update_status(&self.pool, task_id, status).await
    }
}
