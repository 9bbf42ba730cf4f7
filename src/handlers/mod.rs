// HTTP handlers for the token gate

pub mod auth;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;

// Auth routes, mounted behind the auth gate
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/validate", post(auth::validate_token))
}

// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}
