// Authentication rejection responses
// Signature and expiry failures share one outward category

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::jwt::JwtError;

/// Why the gate refused a request
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("Authentication token required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Body of every rejection response
#[derive(Debug, Serialize)]
pub struct AuthErrorResponse {
    pub error: String,
}

impl AuthRejection {
    /// Convert to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthRejection::MissingToken => StatusCode::UNAUTHORIZED,
            AuthRejection::InvalidToken => StatusCode::FORBIDDEN,
        }
    }

    /// Stable code used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthRejection::MissingToken => "MISSING_TOKEN",
            AuthRejection::InvalidToken => "INVALID_TOKEN",
        }
    }
}

impl From<JwtError> for AuthRejection {
    fn from(_: JwtError) -> Self {
        AuthRejection::InvalidToken
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> axum::response::Response {
        let body = AuthErrorResponse {
            error: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Log a rejected request with its internal cause
pub fn log_auth_failure(rejection: AuthRejection, cause: Option<&JwtError>, path: &str) {
    match cause {
        Some(cause) => tracing::warn!(
            error_code = rejection.error_code(),
            cause = %cause,
            path = path,
            "Token verification failed"
        ),
        None => tracing::debug!(
            error_code = rejection.error_code(),
            path = path,
            "Request without bearer token"
        ),
    }
}
