/// Error type for rendering and sending email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Required mail configuration is missing or malformed.
    #[error("Mail configuration error: {0}")]
    Config(String),

    /// No compiled-in template has the requested name.
    #[error("Mail template not found: {0}")]
    TemplateNotFound(String),

    /// The template could not be rendered with the supplied data.
    #[error("Mail template error: {0}")]
    Template(String),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The verification link could not be signed.
    #[error("Verification token error: {0}")]
    Token(String),
}
