use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::UserIdentity;
use crate::config::AuthConfig;
use crate::error::AppError;

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user id the token was issued for.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Returned for any token that does not verify. Why it failed is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidToken;

impl From<InvalidToken> for AppError {
    fn from(_: InvalidToken) -> AppError {
        AppError::Unauthorized("Token is not valid.".into())
    }
}

/// Issues and verifies HS256-signed session tokens.
///
/// Tokens are stateless: nothing is stored server-side, so there is no revocation.
/// The secret and lifetime come from [`AuthConfig`].
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    /// Signs a token for `identity` that expires after the configured lifetime.
    pub fn issue(&self, identity: &UserIdentity) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            AppError::InternalServerError("Token lifetime overflows the clock".into())
        })?;
        let claims = Claims {
            sub: identity.id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature and expiry. Malformed, expired and forged tokens all yield `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<UserIdentity, InvalidToken> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| UserIdentity::new(data.claims.sub))
            .map_err(|e| {
                log::debug!("Token validation failed: {}", e);
                InvalidToken
            })
    }
}
