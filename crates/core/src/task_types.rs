//! Well-known task type names.
//!
//! The API enqueues rows with these names and the worker registry keys its
//! handlers by them, so both sides must agree on the exact spelling.

/// Render and send the account verification email.
pub const SEND_VERIFICATION_EMAIL: &str = "sendVerificationEmail";
