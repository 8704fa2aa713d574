//! Request/response types for the auth endpoints.

use crate::otpgate::service::{Credentials, OpaqueId, UserRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both fields present and non-empty.
    #[must_use]
    pub fn into_credentials(self) -> Option<Credentials> {
        let email = self.email.filter(|email| !email.is_empty())?;
        let password = self.password.filter(|password| !password.is_empty())?;
        Some(Credentials { email, password })
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct VerifyOtpRequest {
    #[schema(value_type = Option<String>)]
    pub history_id: Option<OpaqueId>,
    #[schema(value_type = Option<String>)]
    pub otp: Option<OpaqueId>,
}

impl VerifyOtpRequest {
    /// Both fields present and non-blank, the OTP as text.
    #[must_use]
    pub fn into_parts(self) -> Option<(OpaqueId, String)> {
        let history_id = self.history_id.filter(|id| !id.is_blank())?;
        let otp = self.otp.filter(|otp| !otp.is_blank())?;
        Some((history_id, otp.to_string()))
    }
}

/// Profile returned to the caller after OTP verification.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub full_name: String,
    pub email: Option<Value>,
    pub phone: Option<Value>,
    pub date_of_birth: Option<Value>,
    pub age: Option<Value>,
    pub address: Option<Value>,
    pub city: Option<Value>,
    pub state: Option<Value>,
    pub country: Option<Value>,
    pub zip_code: Option<Value>,
    pub account_code: Option<Value>,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        Self {
            full_name: user.full_name(),
            email: user.email,
            phone: user.phone,
            date_of_birth: user.date_of_birth,
            age: user.age,
            address: user.address,
            city: user.city,
            state: user.state,
            country: user.country,
            zip_code: user.zip_code,
            account_code: user.account_code,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}
