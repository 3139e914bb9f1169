use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// `GET /health` — liveness check. The relay holds no external resources,
/// so reachable means healthy.
async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (StatusCode::OK, Json(response))
}

/// Register health check routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
