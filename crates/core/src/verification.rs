//! Email verification links.
//!
//! A verification link carries an HS256-signed JWT whose claims bind the
//! user id and email address to a fixed purpose and an expiry. The worker
//! generates links when it sends the verification email; the API verifies
//! the token when the link is followed.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Value of the `purpose` claim for verification tokens.
pub const VERIFICATION_PURPOSE: &str = "email_verification";

/// Default token lifetime: 24 hours.
const DEFAULT_TTL_SECS: i64 = 86_400;

/// Default frontend page that consumes the token.
const DEFAULT_BASE_URL: &str = "http://localhost:5173/verify-email";

/// Claims embedded in every verification token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationClaims {
    /// Subject -- the user's database id.
    pub sub: DbId,
    /// The address being verified.
    pub email: String,
    /// Always [`VERIFICATION_PURPOSE`].
    pub purpose: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for verification token signing.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// HMAC-SHA256 secret shared by the API and the worker.
    pub secret: String,
    /// Page the link points at; the token is appended as `?token=`.
    pub base_url: String,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
}

impl VerificationConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                       | Required | Default                               |
    /// |-------------------------------|----------|---------------------------------------|
    /// | `VERIFICATION_SECRET`         | **yes**  | --                                    |
    /// | `VERIFICATION_BASE_URL`       | no       | `http://localhost:5173/verify-email`  |
    /// | `VERIFICATION_TOKEN_TTL_SECS` | no       | `86400`                               |
    ///
    /// # Panics
    ///
    /// Panics if `VERIFICATION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("VERIFICATION_SECRET")
            .expect("VERIFICATION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "VERIFICATION_SECRET must not be empty");

        let base_url =
            std::env::var("VERIFICATION_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let ttl_secs: i64 = std::env::var("VERIFICATION_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TTL_SECS.to_string())
            .parse()
            .expect("VERIFICATION_TOKEN_TTL_SECS must be a valid i64");

        Self {
            secret,
            base_url,
            ttl_secs,
        }
    }

    /// Token lifetime in whole hours, as shown to the recipient.
    pub fn ttl_hours(&self) -> i64 {
        self.ttl_secs / 3600
    }
}

/// A freshly generated verification link.
#[derive(Debug, Clone)]
pub struct VerificationLink {
    pub url: String,
    pub token: String,
    pub expires_at: Timestamp,
}

/// Generate a verification link for the given user.
pub fn generate_link(
    user_id: DbId,
    email: &str,
    config: &VerificationConfig,
) -> Result<VerificationLink, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let exp = now + chrono::Duration::seconds(config.ttl_secs);

    let claims = VerificationClaims {
        sub: user_id,
        email: email.to_string(),
        purpose: VERIFICATION_PURPOSE.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    let separator = if config.base_url.contains('?') { '&' } else { '?' };
    let url = format!("{}{separator}token={token}", config.base_url);

    Ok(VerificationLink {
        url,
        token,
        expires_at: exp,
    })
}

/// Validate a verification token and return its claims.
///
/// Fails with [`CoreError::Unauthorized`] when the signature is wrong, the
/// token has expired, or it was issued for a different purpose.
pub fn verify_token(
    token: &str,
    config: &VerificationConfig,
) -> Result<VerificationClaims, CoreError> {
    let data = decode::<VerificationClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| CoreError::Unauthorized(format!("Invalid verification token: {e}")))?;

    if data.claims.purpose != VERIFICATION_PURPOSE {
        return Err(CoreError::Unauthorized(
            "Token was not issued for email verification".into(),
        ));
    }

    Ok(data.claims)
}
