//! JWT session token handling

use std::fmt;

use anyhow::{Result, anyhow};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT validation error
#[derive(Debug)]
pub enum JwtError {
    /// Token signature has expired
    Expired,
    /// Token signature is invalid
    InvalidSignature,
    /// Other validation error
    Invalid(String),
}

impl fmt::Display for JwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "Session token has expired"),
            Self::InvalidSignature => write!(f, "Invalid session token signature"),
            Self::Invalid(msg) => write!(f, "Invalid session token: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}

/// JWT claims for session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl SessionClaims {
    pub fn new(account_id: i32, email: &str, ttl_days: u32) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(ttl_days as i64);

        Self {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn account_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// Create a signed JWT session token
pub fn create_session_token(signing_key: &[u8], claims: &SessionClaims) -> Result<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(|e| anyhow!("Failed to create JWT: {}", e))
}

/// Validate and decode a JWT session token
pub fn validate_session_token(token: &str, signing_key: &[u8]) -> Result<SessionClaims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data =
        decode::<SessionClaims>(token, &DecodingKey::from_secret(signing_key), &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Invalid(e.to_string()),
            })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> Vec<u8> {
        vec![0u8; 32]
    }

    #[test]
    fn test_create_and_validate() {
        let key = test_key();
        let claims = SessionClaims::new(42, "a@b.com", 30);
        let token = create_session_token(&key, &claims).unwrap();

        let decoded = validate_session_token(&token, &key).unwrap();
        assert_eq!(decoded.account_id(), Some(42));
        assert_eq!(decoded.email, "a@b.com");
        assert_eq!(decoded.exp - decoded.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_invalid_signature() {
        let token = create_session_token(&[0u8; 32], &SessionClaims::new(1, "a@b.com", 1)).unwrap();
        assert!(matches!(
            validate_session_token(&token, &[1u8; 32]),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let key = test_key();
        let mut claims = SessionClaims::new(1, "a@b.com", 1);
        claims.iat -= 3 * 24 * 60 * 60;
        claims.exp = claims.iat + 60;
        let token = create_session_token(&key, &claims).unwrap();

        assert!(matches!(
            validate_session_token(&token, &key),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            validate_session_token("not.a.jwt", &test_key()),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_unique_jti() {
        let c1 = SessionClaims::new(1, "a@b.com", 1);
        let c2 = SessionClaims::new(1, "a@b.com", 1);
        assert_ne!(c1.jti, c2.jti);
    }
}
