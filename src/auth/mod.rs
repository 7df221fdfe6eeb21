use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            email: email.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header, or one that is not `Bearer <token>`
    #[error("{0}")]
    MissingToken(&'static str),

    /// Signature, expiry or decoding failure
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Session signing secret is not configured")]
    InvalidSecret,

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),
}

/// Signs and verifies session tokens with a shared HMAC secret
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
    configured: bool,
}

impl SessionKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
            configured: !secret.is_empty(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    pub fn expires_in_secs(&self) -> u64 {
        self.expiry_hours * 3600
    }

    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        self.encode(&Claims::new(email, self.expiry_hours))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        if !self.configured {
            return Err(AuthError::InvalidSecret);
        }

        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if !self.configured {
            return Err(AuthError::InvalidSecret);
        }

        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::MissingToken("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err(AuthError::MissingToken("Empty bearer token")),
        None => Err(AuthError::MissingToken("Authorization header must use Bearer token format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> SessionKeys {
        SessionKeys::new("unit-test-secret", 2)
    }

    #[test]
    fn issued_token_verifies_with_same_email() {
        let keys = keys();
        let token = keys.issue("a@x.com").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = SessionKeys::new("other", 2).issue("a@x.com").unwrap();
        assert!(matches!(keys().verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_invalid() {
        let keys = keys();
        let mut claims = Claims::new("a@x.com", 2);
        claims.exp = Utc::now().timestamp() - 60;
        let token = keys.encode(&claims).unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert!(matches!(keys().verify("not.a.token"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let keys = SessionKeys::new("", 2);
        assert_eq!(keys.issue("a@x.com"), Err(AuthError::InvalidSecret));
    }

    #[test]
    fn bearer_token_shapes() {
        let mut headers = HeaderMap::new();
        assert!(matches!(bearer_token(&headers), Err(AuthError::MissingToken(_))));

        headers.insert("authorization", HeaderValue::from_static("Token abc"));
        assert!(matches!(bearer_token(&headers), Err(AuthError::MissingToken(_))));

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(matches!(bearer_token(&headers), Err(AuthError::MissingToken(_))));

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Ok("abc.def"));
    }
}
