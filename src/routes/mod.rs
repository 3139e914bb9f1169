mod health;
mod relay;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health` — lightweight liveness check
/// - `GET /ws` — WebSocket upgrade for the game relay
pub fn router() -> Router<AppState> {
    Router::new().merge(health::router()).merge(relay::router())
}
