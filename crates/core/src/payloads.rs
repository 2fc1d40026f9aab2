//! Payload schemas for task types with a known shape.
//!
//! The queue itself treats payloads as opaque JSON text. These types are
//! what the API validates before enqueueing and what the matching worker
//! handler deserializes after decoding.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// Payload of a `sendVerificationEmail` task: the user to verify.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerificationRecipient {
    pub id: DbId,
    #[validate(email)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub name: Option<String>,
}
