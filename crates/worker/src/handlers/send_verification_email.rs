use std::sync::Arc;

use async_trait::async_trait;
use courier_core::payloads::VerificationRecipient;
use courier_core::task_types;
use courier_mail::MailService;
use serde_json::Value;
use validator::Validate;

use crate::error::TaskError;
use crate::registry::TaskHandler;

/// Sends the account verification email for the user in the payload.
pub struct SendVerificationEmail {
    mail: Arc<MailService>,
}

impl SendVerificationEmail {
    pub fn new(mail: Arc<MailService>) -> Self {
        Self { mail }
    }
}

#[async_trait]
impl TaskHandler for SendVerificationEmail {
    fn task_type(&self) -> &str {
        task_types::SEND_VERIFICATION_EMAIL
    }

    async fn handle(&self, payload: Value) -> Result<(), TaskError> {
        let recipient: VerificationRecipient =
            serde_json::from_value(payload).map_err(|e| TaskError::InvalidPayload(e.to_string()))?;
        recipient.validate()?;

        let report = self.mail.send_verification_email(&recipient).await?;
        tracing::info!(
            user_id = recipient.id,
            code = %report.code,
            response = ?report.message,
            "Verification email sent"
        );
        Ok(())
    }
}
