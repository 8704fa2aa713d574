//! # Otpgate (login and OTP verification gateway)
//!
//! `otpgate` fronts an upstream authentication service with a two-step login
//! flow:
//!
//! 1. `POST /login` relays the caller's credentials and returns the upstream's
//!    answer, which on success carries a `history_id` for the OTP challenge.
//! 2. `POST /verify-otp` relays the `history_id` and OTP. When the upstream
//!    returns a verified user, a signed session token (HS256 JWT, 24 hour
//!    lifetime) is minted and returned with the user's profile.
//!
//! The gateway keeps no session state. The signing secret is mandatory
//! configuration; the process refuses to start without it.

pub mod cli;
pub mod otpgate;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
