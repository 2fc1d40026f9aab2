//! Templated transactional email.
//!
//! - [`MailService`] renders an HTML template and hands the message to a
//!   [`MailTransport`].
//! - [`SmtpMailTransport`] is the production transport (lettre, STARTTLS).
//! - [`template`] holds the compiled-in templates and the renderer.

pub mod config;
pub mod error;
pub mod service;
pub mod template;
pub mod transport;

pub use config::MailConfig;
pub use error::MailError;
pub use courier_core::payloads::VerificationRecipient;
pub use service::{MailOptions, MailService, RenderedMail};
pub use transport::{MailTransport, SendReport, SmtpMailTransport};
