#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use courier_core::types::DbId;
use courier_core::verification::VerificationConfig;
use courier_db::models::status::TaskStatus;
use courier_db::models::task::Task;
use courier_mail::{MailConfig, MailError, MailService, MailTransport, SendReport};
use courier_worker::{TaskError, TaskHandler, TaskStore};
use serde_json::Value;

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// [`TaskStore`] over a vector, enforcing the same transitions as the
/// PostgreSQL repository.
#[derive(Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
    pub fetches: AtomicUsize,
    pub updates: Mutex<Vec<(DbId, TaskStatus)>>,
    /// Number of upcoming fetches that fail with a pool timeout.
    pub failing_fetches: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Append a pending task and return its id.
    pub fn push(&self, task_type: &str, payload: &str) -> DbId {
        let mut tasks = self.tasks.lock().unwrap();
        let id = tasks.len() as DbId + 1;
        let now = Utc::now();
        tasks.push(Task {
            id,
            task_type: task_type.to_string(),
            payload: payload.to_string(),
            status_id: TaskStatus::Pending.id(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn status_of(&self, id: DbId) -> Option<TaskStatus> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .and_then(Task::status)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn update_log(&self) -> Vec<(DbId, TaskStatus)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn fetch_oldest_pending(&self) -> Result<Option<Task>, sqlx::Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self
            .failing_fetches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(sqlx::Error::PoolTimedOut);
        }

        Ok(self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.status() == Some(TaskStatus::Pending))
            .cloned())
    }

    async fn update_status(&self, task_id: DbId, status: TaskStatus) -> Result<bool, sqlx::Error> {
        let mut tasks = self.tasks.lock().unwrap();
        let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(false);
        };
        let allowed = task
            .status()
            .is_some_and(|current| current.can_transition_to(status));
        if !allowed {
            return Ok(false);
        }
        task.status_id = status.id();
        task.updated_at = Utc::now();
        self.updates.lock().unwrap().push((task_id, status));
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Records every payload it is invoked with.
pub struct RecordingHandler {
    name: String,
    pub calls: Mutex<Vec<Value>>,
}

impl RecordingHandler {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskHandler for RecordingHandler {
    fn task_type(&self) -> &str {
        &self.name
    }

    async fn handle(&self, payload: Value) -> Result<(), TaskError> {
        self.calls.lock().unwrap().push(payload);
        Ok(())
    }
}

/// Always fails.
pub struct FailingHandler {
    name: String,
    pub calls: AtomicUsize,
}

impl FailingHandler {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TaskHandler for FailingHandler {
    fn task_type(&self) -> &str {
        &self.name
    }

    async fn handle(&self, _payload: Value) -> Result<(), TaskError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TaskError::Failed("boom".to_string()))
    }
}

/// Indexes into a payload field that may be absent, panicking when it is.
pub struct PanickingHandler {
    name: String,
}

impl PanickingHandler {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl TaskHandler for PanickingHandler {
    fn task_type(&self) -> &str {
        &self.name
    }

    async fn handle(&self, payload: Value) -> Result<(), TaskError> {
        let items = payload["items"].as_array().unwrap();
        assert!(!items.is_empty());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mail
// ---------------------------------------------------------------------------

/// Mail transport that accepts everything and keeps the recipients.
#[derive(Default)]
pub struct RecordingTransport {
    pub recipients: Mutex<Vec<String>>,
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: lettre::Message) -> Result<SendReport, MailError> {
        self.recipients
            .lock()
            .unwrap()
            .extend(message.envelope().to().iter().map(|a| a.to_string()));
        Ok(SendReport {
            code: "250".to_string(),
            message: vec!["OK".to_string()],
        })
    }
}

pub fn mail_service() -> (Arc<MailService>, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let config = MailConfig {
        from_name: "Courier Team".to_string(),
        from_address: "no-reply@example.com".to_string(),
        app_password: "app-password".to_string(),
        smtp_host: "localhost".to_string(),
        smtp_port: 2525,
        support_link: String::new(),
    };
    let verification = VerificationConfig {
        secret: "worker-test-secret".to_string(),
        base_url: "https://app.example.com/verify-email".to_string(),
        ttl_secs: 3600,
    };
    let service = Arc::new(MailService::new(config, verification, transport.clone()));
    (service, transport)
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Collects event names in order.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl courier_worker::WorkerObserver for RecordingObserver {
    fn task_started(&self, task: &Task) {
        self.push(format!("started:{}", task.id));
    }

    fn task_completed(&self, task: &Task) {
        self.push(format!("completed:{}", task.id));
    }

    fn handler_missing(&self, task: &Task) {
        self.push(format!("missing:{}", task.task_type));
    }

    fn task_failed(&self, task: &Task, _error: &TaskError) {
        self.push(format!("failed:{}", task.id));
    }

    fn store_error(&self, operation: &'static str, _error: &sqlx::Error) {
        self.push(format!("store_error:{operation}"));
    }
}
