// Middleware modules for the token gate

pub mod auth;
pub mod auth_middleware;

// Re-export auth types
pub use auth::AuthenticatedUser;
pub use auth_middleware::{auth_middleware, authenticate, extract_bearer_token, GateResult};
