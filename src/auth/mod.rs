use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Claims carried by an access token. The numeric user id is the sole
/// subject; there is no revocation list and no refresh flow.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug)]
pub enum TokenError {
    Generation(String),
    Invalid,
    InvalidSecret,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Generation(msg) => write!(f, "token generation error: {}", msg),
            TokenError::Invalid => write!(f, "invalid or expired token"),
            TokenError::InvalidSecret => write!(f, "invalid token signing secret"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issue a signed token for the given user id, valid for the configured
/// expiry window.
pub fn issue(user_id: i64) -> Result<String, TokenError> {
    issue_with_secret(user_id, &config::config().security.jwt_secret)
}

/// Verify a token and return the user id it was issued for.
pub fn verify(token: &str) -> Result<i64, TokenError> {
    verify_with_secret(token, &config::config().security.jwt_secret)
}

fn issue_with_secret(user_id: i64, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::new(Algorithm::HS256);

    encode(&header, &Claims::new(user_id), &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}

fn verify_with_secret(token: &str, secret: &str) -> Result<i64, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    // Pinning HS256 rejects tokens that declare any other algorithm in
    // their header, signature aside.
    let validation = Validation::new(Algorithm::HS256);

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|_| TokenError::Invalid)?;

    Ok(token_data.claims.sub)
}
