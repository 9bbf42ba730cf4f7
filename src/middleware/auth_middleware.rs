// Authentication middleware for protected routes
// Validates bearer tokens and injects AuthenticatedUser into request extensions

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::IdentityClaim,
    services::jwt::{JwtError, JwtService},
    utils::auth_errors::{log_auth_failure, AuthRejection},
};

/// Outcome of authenticating a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    Authorized(IdentityClaim),
    Rejected(AuthRejection),
}

/// Pull the candidate token out of the `Authorization` header
///
/// The value is split on spaces and the second segment is the token; anything
/// after a further space is ignored. The scheme word is not inspected. Returns
/// `None` when the header is absent, not valid UTF-8, has no space, or the
/// second segment is empty (`"Bearer "`, `"Bearer  tok"`).
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(' ').nth(1))
        .filter(|token| !token.is_empty())
}

/// Decide whether a request carries a valid token
pub fn authenticate(jwt_service: &JwtService, headers: &HeaderMap) -> GateResult {
    authenticate_with(jwt_service, headers, |_, _| {})
}

// Shared by `authenticate` and the middleware; `on_failure` sees the internal
// cause, which never reaches the client.
fn authenticate_with<F>(jwt_service: &JwtService, headers: &HeaderMap, on_failure: F) -> GateResult
where
    F: FnOnce(AuthRejection, Option<&JwtError>),
{
    let Some(token) = extract_bearer_token(headers) else {
        on_failure(AuthRejection::MissingToken, None);
        return GateResult::Rejected(AuthRejection::MissingToken);
    };

    match jwt_service.verify(token) {
        Ok(identity) => GateResult::Authorized(identity),
        Err(e) => {
            let rejection = AuthRejection::from(e.clone());
            on_failure(rejection, Some(&e));
            GateResult::Rejected(rejection)
        },
    }
}

/// Middleware function that validates bearer tokens and adds AuthenticatedUser to extensions
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let result = authenticate_with(&app_state.jwt_service, request.headers(), |rejection, cause| {
        log_auth_failure(rejection, cause, &path)
    });

    match result {
        GateResult::Authorized(identity) => {
            tracing::debug!(user_id = %identity.id, path = %path, "Request authorized");

            request
                .extensions_mut()
                .insert(AuthenticatedUser::new(identity));

            next.run(request).await
        },
        GateResult::Rejected(rejection) => rejection.into_response(),
    }
}
