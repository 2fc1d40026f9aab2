use courier_core::verification::VerificationConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the verification secret have defaults suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Requests allowed per client within one window (default: `100`).
    pub rate_limit_max_requests: u32,
    /// Rate limit window length in seconds (default: `60`).
    pub rate_limit_window_secs: u64,
    /// Key the rate limiter on the first `X-Forwarded-For` hop instead of
    /// the peer address (default: `false`). Enable only behind a proxy that
    /// sets the header.
    pub trust_proxy: bool,
    /// Verification token settings, shared with the worker.
    pub verification: VerificationConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `RATE_LIMIT_MAX_REQUESTS` | `100`                   |
    /// | `RATE_LIMIT_WINDOW_SECS`  | `60`                    |
    /// | `TRUST_PROXY`             | `false`                 |
    ///
    /// Verification settings are read by [`VerificationConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let rate_limit_max_requests: u32 = std::env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("RATE_LIMIT_MAX_REQUESTS must be a valid u32");

        let rate_limit_window_secs: u64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid u64");

        let trust_proxy: bool = std::env::var("TRUST_PROXY")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("TRUST_PROXY must be `true` or `false`");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            rate_limit_max_requests,
            rate_limit_window_secs,
            trust_proxy,
            verification: VerificationConfig::from_env(),
        }
    }
}
