use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use infra::models::{Role, UserRow};
use infra::repos::UserRepo;
use infra::JsonStore;

use crate::auth::AuthConfig;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub role: Role,
    pub iat: i64, // Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn new(user: &UserRow, expiration_minutes: Option<u32>) -> Self {
        let now = Utc::now();

        Self {
            sub: user.id.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expiration_minutes.map(|m| (now + Duration::minutes(i64::from(m))).timestamp()),
        }
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_minutes: Option<u32>,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiration_minutes: config.token_expiration_minutes,
        }
    }

    /// Sign a token carrying the user's id and role.
    pub fn create_token(&self, user: &UserRow) -> Result<String, AppError> {
        let claims = Claims::new(user, self.expiration_minutes);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        // `exp` is only present when an expiration is configured; it is still
        // enforced whenever it is there.
        let mut validation = Validation::default();
        validation.required_spec_claims = HashSet::new();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    /// Resolve the user behind a token. Any failure (bad signature, malformed
    /// claims, unknown user, store error) yields `None`.
    pub fn resolve_subject(&self, store: &Arc<JsonStore>, token: &str) -> Option<UserRow> {
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        if token.is_empty() {
            return None;
        }

        let claims = match self.verify_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("Rejected token: {e}");
                return None;
            }
        };

        UserRepo::new(store).get_by_id(&claims.sub).ok().flatten()
    }
}
