//! Second login step: verify the OTP and mint a session token.

use super::{
    state::AuthState,
    types::{UserProfile, VerifyOtpRequest, VerifyOtpResponse},
};
use crate::otpgate::error::{ApiError, ErrorBody};
use axum::{extract::Extension, Json};
use std::sync::Arc;
use tracing::{info, instrument};

pub const OTP_FIELDS_REQUIRED: &str = "History ID and OTP are required";
pub const INVALID_VERIFICATION: &str = "Invalid OTP verification result";
pub const OTP_VERIFIED: &str = "OTP verified successfully";

#[utoipa::path(
    post,
    path = "/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "OTP verified, session token issued", body = VerifyOtpResponse),
        (status = 400, description = "History ID or OTP missing", body = ErrorBody),
        (status = 401, description = "OTP not verified", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn verify_otp(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<VerifyOtpRequest>>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    let (history_id, otp) = payload
        .and_then(|Json(request)| request.into_parts())
        .ok_or(ApiError::Validation(OTP_FIELDS_REQUIRED))?;

    let user = auth_state
        .service()
        .verify_otp(&history_id, &otp)
        .await
        .map_err(|err| ApiError::unexpected("OTP verification error", err))?
        .and_then(|result| result.user)
        .ok_or(ApiError::Authentication(INVALID_VERIFICATION))?;

    let token = auth_state
        .tokens()
        .issue(&user.login_id, user.account_code.as_ref())
        .map_err(|err| ApiError::unexpected("OTP verification error", err))?;

    info!(user_id = %user.login_id, "session token issued");

    Ok(Json(VerifyOtpResponse {
        success: true,
        message: OTP_VERIFIED.to_string(),
        token,
        user: UserProfile::from(user),
    }))
}
