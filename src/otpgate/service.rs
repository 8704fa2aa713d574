//! Authentication service seam.
//!
//! The gateway never verifies credentials or OTPs itself; it hands both steps
//! to an `AuthService`. The production binding is
//! [`HttpAuthService`](super::upstream::HttpAuthService), tests plug in fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Identifier issued by the auth service (`history_id`, `login_id`).
///
/// Upstreams emit these either as JSON strings or numbers. The original JSON
/// form is kept so relayed bodies and token claims stay unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum OpaqueId {
    Text(String),
    Number(serde_json::Number),
}

impl OpaqueId {
    /// Empty text and numeric zero do not identify anything.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Number(number) => number.as_f64() == Some(0.0),
        }
    }
}

impl Default for OpaqueId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for OpaqueId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for OpaqueId {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl std::fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Outcome of the first login step, relayed to the caller unchanged.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LoginResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub history_id: Option<OpaqueId>,
    /// Any other fields the auth service attached to the result.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: serde_json::Map<String, Value>,
}

/// Verified user as returned by the auth service.
///
/// Profile fields are kept in whatever JSON form the upstream used (a zip
/// code may arrive as a number, an age as text) and may be absent or `null`.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserRecord {
    #[serde(default)]
    pub first_name: Option<Value>,
    #[serde(default)]
    pub last_name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub date_of_birth: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub city: Option<Value>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub country: Option<Value>,
    #[serde(default)]
    pub zip_code: Option<Value>,
    #[serde(default)]
    pub account_code: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub login_id: OpaqueId,
}

impl UserRecord {
    /// `"{first} {last}"`, a missing part renders empty (`"Jane "`).
    #[must_use]
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            name_part(self.first_name.as_ref()),
            name_part(self.last_name.as_ref())
        )
    }
}

fn name_part(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VerificationResult {
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("auth service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("auth service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid auth service response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Credential and OTP verification owned by an external service.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and, on success, start an OTP challenge.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResult, AuthServiceError>;

    /// Match an OTP against the challenge identified by `history_id`.
    ///
    /// `Ok(None)` means the service produced no verification result.
    async fn verify_otp(
        &self,
        history_id: &OpaqueId,
        otp: &str,
    ) -> Result<Option<VerificationResult>, AuthServiceError>;
}
