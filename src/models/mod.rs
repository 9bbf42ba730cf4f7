pub mod auth;

// Re-export common types
pub use auth::*;
