use anyhow::Result;
use std::env;

/// Server-held signing key for password-reset tokens.
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub secret: String,
    pub reset_token_expiry: u64, // seconds
}

impl SecretConfig {
    pub fn from_env() -> Result<Self> {
        let secret = env::var("SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("SECRET_KEY environment variable must be set"))?;

        if secret.len() < 32 {
            return Err(anyhow::anyhow!("SECRET_KEY must be at least 32 characters"));
        }

        let reset_token_expiry = env::var("RESET_TOKEN_EXPIRATION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1800); // 30 minutes

        Ok(Self {
            secret,
            reset_token_expiry,
        })
    }
}
