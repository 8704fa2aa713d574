use crate::otpgate::{self, handlers::AuthState, token::SessionTokens, upstream::HttpAuthService};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub jwt_secret: SecretString,
    pub auth_service_url: String,
    pub auth_service_timeout_seconds: u64,
    pub frontend_origin: Option<String>,
}

/// Build the shared auth state, failing fast on bad configuration.
///
/// # Errors
/// Returns an error if the signing secret is empty or the auth service URL is invalid.
pub fn auth_state(args: &Args) -> Result<Arc<AuthState>> {
    let tokens = SessionTokens::new(&args.jwt_secret).context("Invalid --jwt-secret")?;

    let service = HttpAuthService::new(
        &args.auth_service_url,
        Duration::from_secs(args.auth_service_timeout_seconds),
    )?;

    debug!("auth service: {}", args.auth_service_url);

    Ok(Arc::new(AuthState::new(Arc::new(service), tokens)))
}

/// Execute the server action.
/// # Errors
/// Returns an error if the configuration is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let auth_state = auth_state(&args)?;

    info!(
        "Starting {} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        crate::GIT_COMMIT_HASH
    );

    otpgate::new(args.port, auth_state, args.frontend_origin.as_deref()).await
}
