//! First login step: relay credentials to the auth service.

use super::{state::AuthState, types::LoginRequest};
use crate::otpgate::{
    error::{ApiError, ErrorBody},
    service::LoginResult,
};
use axum::{extract::Extension, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, OTP challenge started", body = LoginResult),
        (status = 400, description = "Email or password missing", body = ErrorBody),
        (status = 401, description = "Credentials rejected by the auth service", body = LoginResult),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<(StatusCode, Json<LoginResult>), ApiError> {
    let credentials = payload
        .and_then(|Json(request)| request.into_credentials())
        .ok_or(ApiError::Validation(CREDENTIALS_REQUIRED))?;

    let result = auth_state
        .service()
        .login(&credentials)
        .await
        .map_err(|err| ApiError::unexpected("Login error", err))?;

    debug!(success = result.success, "login result");

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    Ok((status, Json(result)))
}
