//! Courier queue worker.
//!
//! Drains the `tasks` table one row at a time and dispatches each task to
//! the handler registered for its type.
//!
//! - [`QueueWorker`] -- the polling loop and per-task state machine.
//! - [`TaskRegistry`] / [`TaskHandler`] -- explicit type-name -> handler table.
//! - [`TaskStore`] -- storage seam; [`PgTaskStore`] is the PostgreSQL one.
//! - [`WorkerObserver`] -- reporting seam; [`TracingObserver`] logs.

pub mod config;
pub mod error;
pub mod handlers;
pub mod observer;
pub mod registry;
pub mod runner;
pub mod store;

pub use config::WorkerConfig;
pub use error::TaskError;
pub use observer::{TracingObserver, WorkerObserver};
pub use registry::{TaskHandler, TaskRegistry};
pub use runner::{QueueWorker, Tick};
pub use store::{PgTaskStore, TaskStore};
