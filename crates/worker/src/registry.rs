//! Task type -> handler table.
//!
//! Handlers are registered explicitly at start-up (see
//! [`crate::handlers::registry`]); nothing is discovered at runtime. Each
//! handler names the task type it serves.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TaskError;

/// The work behind one task type.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Task type name this handler is registered under.
    fn task_type(&self) -> &str;

    /// Perform the task with its decoded payload.
    async fn handle(&self, payload: Value) -> Result<(), TaskError>;
}

/// Static mapping from task type to handler.
#[derive(Default, Clone)]
pub struct TaskRegistry {
    handlers: HashMap<String, Arc<dyn TaskHandler>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `handler` under its own task type.
    ///
    /// A second handler for the same type replaces the first; the replaced
    /// handler is returned.
    pub fn register(&mut self, handler: Arc<dyn TaskHandler>) -> Option<Arc<dyn TaskHandler>> {
        let task_type = handler.task_type().to_string();
        let previous = self.handlers.insert(task_type.clone(), handler);
        if previous.is_some() {
            tracing::warn!(task_type = %task_type, "Task handler registered twice, replacing");
        }
        previous
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, handler: Arc<dyn TaskHandler>) -> Self {
        self.register(handler);
        self
    }

    pub fn get(&self, task_type: &str) -> Option<&Arc<dyn TaskHandler>> {
        self.handlers.get(task_type)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered task types, sorted.
    pub fn task_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
