//! Reporting hooks for the worker loop.
//!
//! The loop reports what it does through [`WorkerObserver`] instead of
//! logging directly, so tests can assert on the events. [`TracingObserver`]
//! is the production implementation.

use std::time::Duration;

use courier_db::models::task::Task;

use crate::error::TaskError;

/// Receives worker loop events. Every method defaults to a no-op.
pub trait WorkerObserver: Send + Sync {
    fn worker_started(&self, _poll_interval: Duration) {}

    /// The task was moved to `in_progress` and is about to run.
    fn task_started(&self, _task: &Task) {}

    /// The task finished and is being marked `completed`.
    fn task_completed(&self, _task: &Task) {}

    /// No handler is registered for the task's type. The task is still
    /// marked `completed`.
    fn handler_missing(&self, _task: &Task) {}

    /// The task is being marked `failed`.
    fn task_failed(&self, _task: &Task, _error: &TaskError) {}

    /// The task could not be moved to `status`; it was no longer in a state
    /// that allows it.
    fn transition_rejected(&self, _task: &Task, _status: &'static str) {}

    /// A storage call failed. The loop carries on with the next cycle.
    fn store_error(&self, _operation: &'static str, _error: &sqlx::Error) {}

    fn worker_stopped(&self) {}
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl WorkerObserver for TracingObserver {
    fn worker_started(&self, poll_interval: Duration) {
        tracing::info!(
            poll_interval_ms = poll_interval.as_millis() as u64,
            "Queue worker started"
        );
    }

    fn task_started(&self, task: &Task) {
        tracing::info!(task_id = task.id, task_type = %task.task_type, "Task is processing");
    }

    fn task_completed(&self, task: &Task) {
        tracing::info!(task_id = task.id, task_type = %task.task_type, "Task processed");
    }

    fn handler_missing(&self, task: &Task) {
        tracing::warn!(
            task_id = task.id,
            task_type = %task.task_type,
            "Task type is not defined, completing without a handler"
        );
    }

    fn task_failed(&self, task: &Task, error: &TaskError) {
        tracing::error!(
            task_id = task.id,
            task_type = %task.task_type,
            error = %error,
            "Task failed"
        );
    }

    fn transition_rejected(&self, task: &Task, status: &'static str) {
        tracing::warn!(
            task_id = task.id,
            task_type = %task.task_type,
            status,
            "Task status changed underneath the worker, transition skipped"
        );
    }

    fn store_error(&self, operation: &'static str, error: &sqlx::Error) {
        tracing::error!(operation, error = %error, "Task store error");
    }

    fn worker_stopped(&self) {
        tracing::info!("Queue worker stopped");
    }
}
