// Liveness endpoint

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "token-gate",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
