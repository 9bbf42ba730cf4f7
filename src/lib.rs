// Library exports for the token gate
// Bearer-token issuance, verification and request gating for axum services

pub mod app;
pub mod app_config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use app::{build_router, AppState};
pub use app_config::{init_config, AppConfig, ConfigError};
pub use middleware::{auth_middleware, authenticate, AuthenticatedUser, GateResult};
pub use models::auth::{IdentityClaim, TokenClaims};
pub use services::{JwtConfig, JwtError, JwtService, DEFAULT_TOKEN_EXPIRY};
pub use utils::auth_errors::AuthRejection;
