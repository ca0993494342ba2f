//! Session Management and JWT Tokens
//!
//! JWT token generation and validation for user sessions.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Errors from token operations
#[derive(Debug, Error)]
pub enum TokenError {
    /// `JWT_SECRET` is unset in a release build
    #[error("JWT_SECRET is not configured")]
    MissingSecret,

    /// Signing or verification failed
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Get JWT secret from environment
///
/// Debug builds fall back to a fixed development key so local runs and
/// tests work without configuration; release builds refuse to sign or
/// verify anything without `JWT_SECRET` (startup also checks for it, see
/// `server::config`).
fn get_jwt_secret() -> Result<String, TokenError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => Ok(secret),
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("Missing JWT_SECRET, using development default");
            Ok("adboard-development-secret".to_string())
        }
        Err(_) => Err(TokenError::MissingSecret),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a JWT token for a user
///
/// Tokens expire after 30 days.
pub fn create_token(user_id: Uuid, username: String) -> Result<String, TokenError> {
    let now = unix_now();
    let exp = now + (30 * 24 * 60 * 60);

    let claims = Claims {
        sub: user_id.to_string(),
        username,
        exp,
        iat: now,
    };

    let secret = get_jwt_secret()?;
    let key = EncodingKey::from_secret(secret.as_ref());

    Ok(encode(&Header::default(), &claims, &key)?)
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
    let secret = get_jwt_secret()?;
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}
