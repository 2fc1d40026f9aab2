use courier_mail::MailError;

/// Why a task ended in the `failed` state.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The stored payload is not valid JSON.
    #[error("Payload is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// The payload is JSON but not the shape the handler expects.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The payload failed field validation.
    #[error("Payload validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Rendering or sending an email failed.
    #[error(transparent)]
    Mail(#[from] MailError),

    /// Any other handler failure.
    #[error("Task failed: {0}")]
    Failed(String),
}
