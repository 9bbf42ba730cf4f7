// Application state and router assembly
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    app_config::AppConfig,
    handlers,
    middleware::auth_middleware,
    services::{JwtError, JwtService},
};

// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(config: AppConfig, jwt_service: JwtService) -> Self {
        Self {
            config: Arc::new(config),
            jwt_service: Arc::new(jwt_service),
        }
    }

    /// Build state from loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, JwtError> {
        let jwt_service = JwtService::from_app_config(config)?;
        Ok(Self::new(config.clone(), jwt_service))
    }
}

/// Assemble the full router: public routes plus gated auth routes under `/api/v1`
pub fn build_router(state: AppState) -> Router {
    let protected = handlers::auth_routes()
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .merge(handlers::public_routes())
        .nest("/auth", protected);

    Router::new()
        .nest("/api/v1", api)
        .layer(cors_layer(&state.config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
