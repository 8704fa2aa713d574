//! Map parsed command-line arguments to the action to run.

use crate::cli::{
    actions::{server::Args, Action},
    commands::{
        ARG_AUTH_SERVICE_TIMEOUT, ARG_AUTH_SERVICE_URL, ARG_FRONTEND_ORIGIN, ARG_JWT_SECRET,
        ARG_PORT,
    },
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let jwt_secret = matches
        .get_one::<String>(ARG_JWT_SECRET)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --{ARG_JWT_SECRET}"))?;

    let auth_service_url = matches
        .get_one::<String>(ARG_AUTH_SERVICE_URL)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --{ARG_AUTH_SERVICE_URL}"))?;

    Ok(Action::Server(Args {
        port: matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080),
        jwt_secret: SecretString::from(jwt_secret),
        auth_service_url,
        auth_service_timeout_seconds: matches
            .get_one::<u64>(ARG_AUTH_SERVICE_TIMEOUT)
            .copied()
            .unwrap_or(10),
        frontend_origin: matches.get_one::<String>(ARG_FRONTEND_ORIGIN).cloned(),
    }))
}
