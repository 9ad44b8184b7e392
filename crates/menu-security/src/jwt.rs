//! Session token handling

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id on the store platform.
    pub sub: String,
    /// Session id the request nonce is bound to.
    pub sid: String,
    #[serde(default)]
    pub roles: BTreeSet<String>,
    #[serde(default)]
    pub caps: BTreeSet<String>,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtService {
    secret: String,
    expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: String, expiry_secs: i64) -> Self {
        Self { secret, expiry_secs }
    }

    /// Issue a session token. The platform's login flow normally does this;
    /// the server only verifies.
    pub fn issue<R, C>(&self, sub: &str, sid: &str, roles: R, caps: C) -> Result<String, JwtError>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            sid: sid.to_string(),
            roles: roles.into_iter().map(Into::into).collect(),
            caps: caps.into_iter().map(Into::into).collect(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}
