use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything heavy is behind an `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: courier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-client request budget shared by every route.
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(pool: courier_db::DbPool, config: ServerConfig) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit_max_requests,
            std::time::Duration::from_secs(config.rate_limit_window_secs),
        ));
        Self {
            pool,
            config: Arc::new(config),
            rate_limiter,
        }
    }
}
