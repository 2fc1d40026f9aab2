//! Outbound mail transports.
//!
//! [`MailTransport`] is the seam between message composition and delivery.
//! [`SmtpMailTransport`] wraps lettre's async SMTP transport; tests provide
//! their own implementation that records messages instead of sending them.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Serialize;

use crate::config::MailConfig;
use crate::error::MailError;

/// What the transport reported for one submitted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReport {
    /// SMTP reply code, e.g. `250`.
    pub code: String,
    /// Reply text lines.
    pub message: Vec<String>,
}

/// Submits fully-built messages for delivery.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: Message) -> Result<SendReport, MailError>;
}

/// SMTP transport using STARTTLS and the configured app password.
#[derive(Clone)]
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build the transport. No connection is opened until the first send.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.from_address.clone(),
                config.app_password.clone(),
            ))
            .build();

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP transport initialized (STARTTLS)"
        );

        Ok(Self { mailer })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: Message) -> Result<SendReport, MailError> {
        let response = self.mailer.send(message).await?;
        Ok(SendReport {
            code: response.code().to_string(),
            message: response.message().map(str::to_string).collect(),
        })
    }
}
