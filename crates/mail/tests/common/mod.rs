use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use courier_core::verification::VerificationConfig;
use courier_mail::{MailConfig, MailError, MailService, MailTransport, SendReport};
use lettre::Message;

/// Envelope and headers of one message captured by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub from: Option<String>,
    pub to: Vec<String>,
    pub subject: Option<String>,
    pub content_type: Option<String>,
}

/// Transport that records messages instead of delivering them.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: Message) -> Result<SendReport, MailError> {
        let envelope = message.envelope();
        let headers = message.headers();
        self.sent.lock().unwrap().push(SentMail {
            from: envelope.from().map(|a| a.to_string()),
            to: envelope.to().iter().map(|a| a.to_string()).collect(),
            subject: headers.get_raw("Subject").map(str::to_string),
            content_type: headers.get_raw("Content-Type").map(str::to_string),
        });
        Ok(SendReport {
            code: "250".to_string(),
            message: vec!["2.0.0 OK queued".to_string()],
        })
    }
}

pub fn mail_config() -> MailConfig {
    MailConfig {
        from_name: "Courier Team".to_string(),
        from_address: "no-reply@example.com".to_string(),
        app_password: "app-password".to_string(),
        smtp_host: "localhost".to_string(),
        smtp_port: 2525,
        support_link: "https://example.com/support".to_string(),
    }
}

pub fn verification_config() -> VerificationConfig {
    VerificationConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        base_url: "https://app.example.com/verify-email".to_string(),
        ttl_secs: 86_400,
    }
}

/// Build a service wired to a fresh recording transport.
pub fn recording_service() -> (MailService, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let service = MailService::new(mail_config(), verification_config(), transport.clone());
    (service, transport)
}
