// Handlers that read the identity attached by the auth gate

use axum::{response::IntoResponse, Json};
use serde::Serialize;

use crate::middleware::AuthenticatedUser;

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub id: String,
    pub username: String,
}

/// Return the caller's identity
pub async fn get_current_user(user: AuthenticatedUser) -> impl IntoResponse {
    Json(user)
}

/// Confirm the presented token is valid
pub async fn validate_token(user: AuthenticatedUser) -> impl IntoResponse {
    Json(ValidateResponse {
        valid: true,
        id: user.id().to_string(),
        username: user.username().to_string(),
    })
}
