//! Stateless password-reset tokens.
//!
//! A token is a signed, self-describing payload embedding the user id and
//! issuance time. Nothing is stored server side, so a token cannot be
//! revoked before its window elapses; callers treat a verified token as
//! single-use by immediately changing the password.

use anyhow::Result;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::config::secret::SecretConfig;

static SECRET_CONFIG: OnceLock<SecretConfig> = OnceLock::new();

/// Initialize the signing config from environment. Must be called once at startup.
pub fn init_secret_config(config: SecretConfig) -> Result<()> {
    SECRET_CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Secret config already initialized"))?;
    Ok(())
}

fn get_config() -> &'static SecretConfig {
    SECRET_CONFIG
        .get()
        .expect("Secret config not initialized — call init_secret_config() at startup")
}

#[derive(Error, Debug, PartialEq)]
pub enum ResetTokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Token is malformed")]
    Malformed,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    sub: String, // user_id
    iat: usize,  // issued at
    exp: usize,  // issuance time + expiry window
}

/// Issue a reset token for `user_id` using the configured expiry window.
pub fn issue(user_id: i32) -> Result<String> {
    issue_with_expiry(user_id, get_config().reset_token_expiry)
}

/// Issue a reset token valid for `expiry_secs` from now.
pub fn issue_with_expiry(user_id: i32, expiry_secs: u64) -> Result<String> {
    let config = get_config();
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = ResetClaims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + expiry_secs as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to encode reset token: {}", e))
}

/// Verify a reset token and return the embedded user id.
///
/// The signature is recomputed and the expiry window checked before the
/// payload is trusted.
pub fn verify(token: &str) -> Result<i32, ResetTokenError> {
    let config = get_config();

    // The expiry window is exact; no clock leeway.
    let mut validation = Validation::default();
    validation.leeway = 0;

    let claims = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => ResetTokenError::Expired,
        ErrorKind::InvalidSignature => ResetTokenError::InvalidSignature,
        _ => ResetTokenError::Malformed,
    })?;

    claims.sub.parse().map_err(|_| ResetTokenError::Malformed)
}
