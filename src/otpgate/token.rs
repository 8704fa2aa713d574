//! Session tokens issued after a successful OTP verification.
//!
//! Tokens are HS256 JWTs carrying `user_id` and `account_code`, valid for
//! 24 hours. Nothing is stored server-side.

use super::service::OpaqueId;
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SESSION_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionClaims {
    pub user_id: OpaqueId,
    /// Relayed in the form the auth service used (text or number).
    pub account_code: Option<Value>,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies session tokens with the configured secret.
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionTokens {
    /// # Errors
    /// Returns an error if the secret is empty.
    pub fn new(secret: &SecretString) -> Result<Self> {
        let secret = secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(anyhow!("JWT signing secret must not be empty"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(SESSION_TOKEN_TTL_HOURS),
        })
    }

    /// Mint a token for a verified user.
    ///
    /// # Errors
    /// Returns an error if encoding fails.
    pub fn issue(&self, user_id: &OpaqueId, account_code: Option<&Value>) -> Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            user_id: user_id.clone(),
            account_code: account_code.cloned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Decode a token, checking signature and expiry.
    ///
    /// # Errors
    /// Returns an error if the token is malformed, forged, or expired.
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
