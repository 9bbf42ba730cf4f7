// Utility modules for the token gate

pub mod auth_errors;

pub use auth_errors::{log_auth_failure, AuthErrorResponse, AuthRejection};
