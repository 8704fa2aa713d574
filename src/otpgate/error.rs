//! Mapping from handler failures to HTTP responses.
//!
//! Every handler failure ends up as an `ApiError`, and this is the only place
//! that decides its status and body. Unexpected failures are logged here and
//! replaced by a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Body of every non-relayed error response.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required request fields are missing.
    #[error("{0}")]
    Validation(&'static str),
    /// Credentials or OTP were rejected.
    #[error("{0}")]
    Authentication(&'static str),
    /// Anything else; details stay in the logs.
    #[error("{context}: {error:#}")]
    Unexpected {
        context: &'static str,
        error: anyhow::Error,
    },
}

impl ApiError {
    pub fn unexpected(context: &'static str, error: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected {
            context,
            error: error.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(message) | Self::Authentication(message) => ErrorBody::new(*message),
            Self::Unexpected { .. } => ErrorBody::new(INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Unexpected { context, error } = &self {
            error!("{context}: {error:?}");
        }

        (self.status(), Json(self.body())).into_response()
    }
}
