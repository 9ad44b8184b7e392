//! Per-session request nonces
//!
//! A nonce is an HMAC over the action name, the session identity and a time
//! tick that advances every half lifetime. The current and the previous tick
//! are accepted, so a nonce stays valid for between half and one full
//! lifetime.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug)]
pub enum NonceError {
    #[error("Nonce key error: {0}")]
    KeyError(String),
    #[error("Nonce is not valid for this action and session")]
    Invalid,
}

#[derive(Clone)]
pub struct NonceService {
    secret: String,
    lifetime_secs: i64,
}

impl NonceService {
    pub fn new(secret: String, lifetime_secs: i64) -> Self {
        Self {
            secret,
            lifetime_secs: lifetime_secs.max(2),
        }
    }

    pub fn create(&self, action: &str, user_id: &str, session_id: &str) -> Result<String, NonceError> {
        self.create_at(action, user_id, session_id, Utc::now().timestamp())
    }

    pub fn verify(
        &self,
        nonce: &str,
        action: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<(), NonceError> {
        self.verify_at(nonce, action, user_id, session_id, Utc::now().timestamp())
    }

    fn create_at(&self, action: &str, user_id: &str, session_id: &str, now: i64) -> Result<String, NonceError> {
        let mac = self.mac(action, user_id, session_id, self.tick(now))?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn verify_at(
        &self,
        nonce: &str,
        action: &str,
        user_id: &str,
        session_id: &str,
        now: i64,
    ) -> Result<(), NonceError> {
        let expected = hex::decode(nonce).map_err(|_| NonceError::Invalid)?;
        let tick = self.tick(now);
        for candidate in [tick, tick - 1] {
            let mac = self.mac(action, user_id, session_id, candidate)?;
            if mac.verify_slice(&expected).is_ok() {
                return Ok(());
            }
        }
        Err(NonceError::Invalid)
    }

    fn tick(&self, now: i64) -> i64 {
        let half = self.lifetime_secs / 2;
        (now + half - 1).div_euclid(half)
    }

    fn mac(&self, action: &str, user_id: &str, session_id: &str, tick: i64) -> Result<HmacSha256, NonceError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| NonceError::KeyError(e.to_string()))?;
        mac.update(format!("{}|{}|{}|{}", action, user_id, session_id, tick).as_bytes());
        Ok(mac)
    }
}
