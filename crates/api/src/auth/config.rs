use anyhow::{Context, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Tokens never expire unless this is set.
    pub token_expiration_minutes: Option<u32>,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            token_expiration_minutes: parse_expiration(
                env::var("TOKEN_EXPIRATION_MINUTES").ok().as_deref(),
            )?,
        })
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            token_expiration_minutes: None,
        }
    }
}

/// Unset or blank means no expiration; anything else must be a whole number
/// of minutes.
fn parse_expiration(value: Option<&str>) -> Result<Option<u32>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .with_context(|| format!("TOKEN_EXPIRATION_MINUTES must be a number of minutes, got {v:?}")),
    }
}
