// Verified identity attached to a request by the auth gate

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Serialize;

use crate::models::auth::IdentityClaim;
use crate::utils::auth_errors::AuthRejection;

/// Authenticated user information extracted from a verified token
///
/// Handlers receive a copy; the claim itself is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    #[serde(flatten)]
    identity: IdentityClaim,
}

impl AuthenticatedUser {
    pub fn new(identity: IdentityClaim) -> Self {
        Self { identity }
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub fn identity(&self) -> &IdentityClaim {
        &self.identity
    }
}

/// Extractor for AuthenticatedUser from request extensions
///
/// Only routes behind `auth_middleware` have the extension; anywhere else the
/// extractor rejects as if no token had been sent.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthRejection::MissingToken)
    }
}
