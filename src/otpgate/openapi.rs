use super::{
    error::ErrorBody,
    handlers::{
        health, login,
        types::{LoginRequest, UserProfile, VerifyOtpRequest, VerifyOtpResponse},
        verify_otp,
    },
    service::{LoginResult, UserRecord},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(health::health, login::login, verify_otp::verify_otp),
    components(schemas(
        health::Health,
        LoginRequest,
        LoginResult,
        VerifyOtpRequest,
        VerifyOtpResponse,
        UserProfile,
        UserRecord,
        ErrorBody
    )),
    tags(
        (name = "auth", description = "Login and OTP verification"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
