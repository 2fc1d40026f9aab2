//! PostgreSQL access for the task queue.
//!
//! Connection setup, migrations, row models and repositories shared by the
//! API server (which enqueues tasks) and the worker (which drains them).

use std::path::PathBuf;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default PostgreSQL port.
const DEFAULT_PORT: u16 = 5432;

/// Connection settings loaded from the environment.
///
/// `DATABASE_URL` wins when set; otherwise the connection is assembled from
/// the individual `DB_*` variables. In both cases `DB_SSL_CA` switches the
/// connection to verify-full TLS against the given CA bundle.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub ssl_ca: Option<PathBuf>,
}

impl DbConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var        | Default     |
    /// |----------------|-------------|
    /// | `DATABASE_URL` | --          |
    /// | `DB_HOST`      | `localhost` |
    /// | `DB_PORT`      | `5432`      |
    /// | `DB_USER`      | --          |
    /// | `DB_PASS`      | --          |
    /// | `DB_NAME`      | --          |
    /// | `DB_SSL_CA`    | --          |
    pub fn from_env() -> Self {
        let port = std::env::var("DB_PORT")
            .ok()
            .map(|p| p.parse().expect("DB_PORT must be a valid u16"))
            .unwrap_or(DEFAULT_PORT);

        Self {
            url: std::env::var("DATABASE_URL").ok(),
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into()),
            port,
            user: std::env::var("DB_USER").ok(),
            password: std::env::var("DB_PASS").ok(),
            database: std::env::var("DB_NAME").ok(),
            ssl_ca: std::env::var("DB_SSL_CA").ok().map(PathBuf::from),
        }
    }

    /// Build sqlx connect options from this configuration.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let mut options = match &self.url {
            Some(url) => url.parse::<PgConnectOptions>()?,
            None => {
                let mut options = PgConnectOptions::new().host(&self.host).port(self.port);
                if let Some(user) = &self.user {
                    options = options.username(user);
                }
                if let Some(password) = &self.password {
                    options = options.password(password);
                }
                if let Some(database) = &self.database {
                    options = options.database(database);
                }
                options
            }
        };

        if let Some(ca) = &self.ssl_ca {
            options = options.ssl_mode(PgSslMode::VerifyFull).ssl_root_cert(ca);
        }

        Ok(options)
    }
}

/// Create a connection pool from a [`DbConfig`].
pub async fn connect(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = config.connect_options()?;
    tracing::debug!(
        host = %config.host,
        port = config.port,
        tls = config.ssl_ca.is_some(),
        from_url = config.url.is_some(),
        "Connecting to database"
    );
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
