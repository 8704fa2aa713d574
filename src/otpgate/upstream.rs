//! `AuthService` backed by an upstream HTTP authentication service.
//!
//! - `POST {base}/login` with `{email, password}`. A 2xx or 4xx reply carrying
//!   a login result is returned as-is so the upstream's own failure message
//!   reaches the caller.
//! - `POST {base}/verify-otp` with `{history_id, otp}`. A 2xx reply is decoded
//!   as an optional verification result; any 4xx means no result.
//!
//! Server errors, transport failures, and undecodable bodies are errors.

use super::service::{
    AuthService, AuthServiceError, Credentials, LoginResult, OpaqueId, VerificationResult,
};
use crate::APP_USER_AGENT;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

#[derive(Clone, Debug)]
pub struct HttpAuthService {
    client: Client,
    login_url: Url,
    verify_otp_url: Url,
}

#[derive(Serialize)]
struct VerifyOtpPayload<'a> {
    history_id: &'a OpaqueId,
    otp: &'a str,
}

impl HttpAuthService {
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid auth service URL: {base_url}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Auth service URL cannot be used as a base: {base_url}");
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build auth service HTTP client")?;

        Ok(Self {
            client,
            login_url: endpoint(&base, "login")?,
            verify_otp_url: endpoint(&base, "verify-otp")?,
        })
    }
}

// Appends to the base path instead of replacing its last segment.
fn endpoint(base: &Url, name: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("Auth service URL cannot be used as a base: {base}"))?
        .pop_if_empty()
        .push(name);
    Ok(url)
}

async fn read_body(response: Response) -> Result<(reqwest::StatusCode, String), AuthServiceError> {
    let status = response.status();
    let body = response.text().await?;
    debug!("auth service replied {status}");
    Ok((status, body))
}

#[async_trait]
impl AuthService for HttpAuthService {
    #[instrument(skip_all, fields(url = %self.login_url))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginResult, AuthServiceError> {
        let response = self
            .client
            .post(self.login_url.clone())
            .json(credentials)
            .send()
            .await?;
        let (status, body) = read_body(response).await?;

        match serde_json::from_str::<LoginResult>(&body) {
            Ok(result) if status.is_success() || status.is_client_error() => Ok(result),
            Err(err) if status.is_success() => Err(err.into()),
            _ => Err(AuthServiceError::Status { status, body }),
        }
    }

    #[instrument(skip_all, fields(url = %self.verify_otp_url, history_id = %history_id))]
    async fn verify_otp(
        &self,
        history_id: &OpaqueId,
        otp: &str,
    ) -> Result<Option<VerificationResult>, AuthServiceError> {
        let response = self
            .client
            .post(self.verify_otp_url.clone())
            .json(&VerifyOtpPayload { history_id, otp })
            .send()
            .await?;
        let (status, body) = read_body(response).await?;

        if status.is_success() {
            return Ok(serde_json::from_str::<Option<VerificationResult>>(&body)?);
        }
        if status.is_client_error() {
            return Ok(None);
        }

        Err(AuthServiceError::Status { status, body })
    }
}
