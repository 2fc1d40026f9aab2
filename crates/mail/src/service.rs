//! Template-rendering mail service.
//!
//! [`MailService`] is constructed once at start-up and handed to the task
//! handlers that need it; it holds no global state.

use std::sync::Arc;

use courier_core::payloads::VerificationRecipient;
use courier_core::verification::{self, VerificationConfig};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::Message;
use serde_json::{json, Value};

use crate::config::MailConfig;
use crate::error::MailError;
use crate::template;
use crate::transport::{MailTransport, SendReport};

/// Subject line of the verification email.
pub const VERIFICATION_SUBJECT: &str = "Verification";

/// A request to render `template` with `template_data` and mail it to `to`.
#[derive(Debug, Clone)]
pub struct MailOptions {
    pub to: String,
    pub subject: String,
    pub template: String,
    pub template_data: Value,
}

/// A rendered message, before it is turned into MIME.
#[derive(Debug, Clone)]
pub struct RenderedMail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub html: String,
}

/// Renders templates and submits them through a [`MailTransport`].
pub struct MailService {
    config: MailConfig,
    verification: VerificationConfig,
    transport: Arc<dyn MailTransport>,
}

impl MailService {
    pub fn new(
        config: MailConfig,
        verification: VerificationConfig,
        transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            config,
            verification,
            transport,
        }
    }

    /// The `"Name" <address>` sender mailbox.
    pub fn sender(&self) -> Result<Mailbox, MailError> {
        Ok(Mailbox::new(
            Some(self.config.from_name.clone()),
            self.config.from_address.parse()?,
        ))
    }

    /// Render `options` without sending anything.
    pub fn render(&self, options: &MailOptions) -> Result<RenderedMail, MailError> {
        let html = template::render(&options.template, &options.template_data)?;
        Ok(RenderedMail {
            from: self.sender()?,
            to: options.to.parse()?,
            subject: options.subject.clone(),
            html,
        })
    }

    /// Render `options` and submit the message to the transport.
    pub async fn send(&self, options: MailOptions) -> Result<SendReport, MailError> {
        let rendered = self.render(&options)?;

        let message = Message::builder()
            .from(rendered.from)
            .to(rendered.to)
            .subject(rendered.subject)
            .header(ContentType::TEXT_HTML)
            .body(rendered.html)
            .map_err(|e| MailError::Build(e.to_string()))?;

        let report = self.transport.send(message).await?;
        tracing::debug!(
            template = %options.template,
            code = %report.code,
            "Mail submitted to transport"
        );
        Ok(report)
    }

    /// Build the options for a verification email, signing a fresh link.
    pub fn verification_options(
        &self,
        recipient: &VerificationRecipient,
    ) -> Result<MailOptions, MailError> {
        let link = verification::generate_link(recipient.id, &recipient.email, &self.verification)
            .map_err(|e| MailError::Token(e.to_string()))?;

        let name = recipient
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("there");

        Ok(MailOptions {
            to: recipient.email.clone(),
            subject: VERIFICATION_SUBJECT.to_string(),
            template: template::VERIFICATION_EMAIL.to_string(),
            template_data: json!({
                "name": name,
                "verificationLink": link.url,
                "verificationEmailTTL": self.verification.ttl_hours(),
                "supportLink": self.config.support_link,
            }),
        })
    }

    /// Send the account verification email to `recipient`.
    pub async fn send_verification_email(
        &self,
        recipient: &VerificationRecipient,
    ) -> Result<SendReport, MailError> {
        let options = self.verification_options(recipient)?;
        self.send(options).await
    }
}
