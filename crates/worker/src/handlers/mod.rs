//! Task handlers and the start-up registry.
//!
//! Adding a task type means adding a module here and one `.with(..)` line
//! in [`registry`].

mod send_verification_email;

use std::sync::Arc;

use courier_mail::MailService;

pub use send_verification_email::SendVerificationEmail;

use crate::registry::TaskRegistry;

/// Every handler this worker knows about.
pub fn registry(mail: Arc<MailService>) -> TaskRegistry {
    TaskRegistry::new().with(Arc::new(SendVerificationEmail::new(mail)))
}
