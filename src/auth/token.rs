use crate::errors::{BoardError, Result};
use crate::models::User;
use axum::http::{HeaderMap, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub email: String,
    pub exp: usize,
}

pub fn issue_token(user: &User, secret: &str, ttl_hours: i64) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| BoardError::Internal("Failed to calculate expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| BoardError::Internal(format!("Token Creation failed: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> Result<User> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| User::new(data.claims.sub, data.claims.email))
    .map_err(|_| BoardError::AuthRequired)
}

/// Resolves the acting user from an `Authorization: Bearer` header.
///
/// No header means an anonymous actor; a header that doesn't verify is an
/// error, never a silent downgrade to anonymous.
pub fn actor_from_headers(headers: &HeaderMap, secret: &str) -> Result<Option<User>> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(BoardError::AuthRequired)?;

    verify_token(token, secret).map(Some)
}
