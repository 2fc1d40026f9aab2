use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courier_core::verification::VerificationConfig;
use courier_db::DbConfig;
use courier_mail::{MailConfig, MailService, SmtpMailTransport};
use courier_worker::{handlers, PgTaskStore, QueueWorker, WorkerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier_worker=debug,courier_mail=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let worker_config = WorkerConfig::from_env();
    let mail_config = MailConfig::from_env().expect("Invalid mail configuration");
    let verification = VerificationConfig::from_env();

    // --- Database ---
    let pool = courier_db::connect(&DbConfig::from_env())
        .await
        .expect("Failed to connect to database");
    courier_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection pool created");

    // --- Mail ---
    let transport =
        SmtpMailTransport::from_config(&mail_config).expect("Failed to build SMTP transport");
    let mail = Arc::new(MailService::new(
        mail_config,
        verification,
        Arc::new(transport),
    ));

    // --- Worker ---
    let worker = QueueWorker::new(
        Arc::new(PgTaskStore::new(pool.clone())),
        handlers::registry(mail),
        worker_config,
    );
    tracing::info!(
        task_types = ?worker.registry().task_types(),
        "Task handlers registered"
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_cancel.cancel();
    });

    worker.run(cancel).await;

    pool.close().await;
    tracing::info!("Database pool closed, exiting");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), stopping after the current task");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping after the current task");
        }
    }
}
