// Services module for the token gate
// Business logic layer for the application

pub mod jwt;

// Re-export commonly used services
pub use jwt::{JwtConfig, JwtError, JwtService, DEFAULT_TOKEN_EXPIRY};
