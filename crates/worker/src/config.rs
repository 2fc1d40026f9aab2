//! Worker configuration.

use std::time::Duration;

/// Default delay between polls.
const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Fixed sleep after every loop iteration.
    pub poll_interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                  | Default |
    /// |--------------------------|---------|
    /// | `QUEUE_POLL_INTERVAL_MS` | `3000`  |
    pub fn from_env() -> Self {
        let poll_interval_ms: u64 = std::env::var("QUEUE_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_MS.to_string())
            .parse()
            .expect("QUEUE_POLL_INTERVAL_MS must be a valid u64");

        Self {
            poll_interval: Duration::from_millis(poll_interval_ms),
        }
    }
}
