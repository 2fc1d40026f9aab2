//! The queue polling loop.
//!
//! One task at a time, oldest first. Each cycle:
//!
//! 1. fetch the oldest pending task (none -> [`Tick::Idle`]);
//! 2. mark it `in_progress`;
//! 3. decode its JSON payload and resolve a handler by type;
//! 4. run the handler on its own tokio task, so a panic counts as a failure;
//! 5. mark it `completed` on success (or when no handler exists) and
//!    `failed` on any error.
//!
//! [`QueueWorker::run`] sleeps the poll interval after every cycle,
//! whatever the outcome. Errors never escape a cycle: storage failures are
//! reported to the observer and the loop carries on.

use std::sync::Arc;

use courier_core::types::DbId;
use courier_db::models::status::TaskStatus;
use courier_db::models::task::Task;
use tokio_util::sync::CancellationToken;

use crate::config::WorkerConfig;
use crate::error::TaskError;
use crate::observer::{TracingObserver, WorkerObserver};
use crate::registry::TaskRegistry;
use crate::store::TaskStore;

/// Outcome of a single poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No pending task.
    Idle,
    /// The task left `pending` before it could be claimed.
    Skipped { task_id: DbId },
    /// The handler ran and succeeded.
    Completed { task_id: DbId },
    /// No handler is registered for the type; the task was completed anyway.
    Unhandled { task_id: DbId },
    /// Decoding or the handler failed; the task was marked `failed`.
    Failed { task_id: DbId },
    /// A storage call failed.
    StoreUnavailable,
}

/// How a claimed task ended, before the terminal status is written.
enum Outcome {
    Completed,
    Unhandled,
    Failed,
}

/// Polls a [`TaskStore`] and dispatches tasks through a [`TaskRegistry`].
pub struct QueueWorker {
    store: Arc<dyn TaskStore>,
    registry: TaskRegistry,
    config: WorkerConfig,
    observer: Arc<dyn WorkerObserver>,
}

impl QueueWorker {
    pub fn new(store: Arc<dyn TaskStore>, registry: TaskRegistry, config: WorkerConfig) -> Self {
        Self {
            store,
            registry,
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default [`TracingObserver`].
    pub fn with_observer(mut self, observer: Arc<dyn WorkerObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Run until `cancel` fires.
    ///
    /// Cancellation is only observed while sleeping; a task that has been
    /// claimed always runs to its terminal status.
    pub async fn run(&self, cancel: CancellationToken) {
        self.observer.worker_started(self.config.poll_interval);

        loop {
            self.tick().await;

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }

        self.observer.worker_stopped();
    }

    /// One poll cycle, without the trailing sleep.
    pub async fn tick(&self) -> Tick {
        let task = match self.store.fetch_oldest_pending().await {
            Ok(Some(task)) => task,
            Ok(None) => return Tick::Idle,
            Err(e) => {
                self.observer.store_error("fetch_oldest_pending", &e);
                return Tick::StoreUnavailable;
            }
        };

        match self.store.update_status(task.id, TaskStatus::InProgress).await {
            Ok(true) => {}
            Ok(false) => {
                self.observer
                    .transition_rejected(&task, TaskStatus::InProgress.name());
                return Tick::Skipped { task_id: task.id };
            }
            Err(e) => {
                self.observer.store_error("update_status", &e);
                return Tick::StoreUnavailable;
            }
        }
        self.observer.task_started(&task);

        let (outcome, status) = match self.execute(&task).await {
            Ok(true) => {
                self.observer.task_completed(&task);
                (Outcome::Completed, TaskStatus::Completed)
            }
            Ok(false) => {
                self.observer.handler_missing(&task);
                (Outcome::Unhandled, TaskStatus::Completed)
            }
            Err(e) => {
                self.observer.task_failed(&task, &e);
                (Outcome::Failed, TaskStatus::Failed)
            }
        };

        match self.store.update_status(task.id, status).await {
            Ok(true) => {}
            Ok(false) => self.observer.transition_rejected(&task, status.name()),
            Err(e) => {
                self.observer.store_error("update_status", &e);
                return Tick::StoreUnavailable;
            }
        }

        match outcome {
            Outcome::Completed => Tick::Completed { task_id: task.id },
            Outcome::Unhandled => Tick::Unhandled { task_id: task.id },
            Outcome::Failed => Tick::Failed { task_id: task.id },
        }
    }

    /// Decode and dispatch. `Ok(false)` when no handler is registered.
    async fn execute(&self, task: &Task) -> Result<bool, TaskError> {
        let payload: serde_json::Value =
            serde_json::from_str(&task.payload).map_err(TaskError::Decode)?;

        let Some(handler) = self.registry.get(&task.task_type) else {
            return Ok(false);
        };

        // A panic inside the handler surfaces here as a JoinError.
        let handler = Arc::clone(handler);
        match tokio::spawn(async move { handler.handle(payload).await }).await {
            Ok(result) => result.map(|()| true),
            Err(e) if e.is_panic() => Err(TaskError::Failed(format!(
                "handler panicked: {}",
                panic_message(e.into_panic())
            ))),
            Err(e) => Err(TaskError::Failed(format!("handler task aborted: {e}"))),
        }
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send + 'static>) -> String {
    panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string())
}
