//! Shared, read-only state handed to the auth handlers.

use crate::otpgate::{service::AuthService, token::SessionTokens};
use std::sync::Arc;

pub struct AuthState {
    service: Arc<dyn AuthService>,
    tokens: SessionTokens,
}

impl AuthState {
    pub fn new(service: Arc<dyn AuthService>, tokens: SessionTokens) -> Self {
        Self { service, tokens }
    }

    pub(super) fn service(&self) -> &dyn AuthService {
        self.service.as_ref()
    }

    #[must_use]
    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
