#![allow(dead_code)] // each integration test binary uses a subset of these helpers

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use gridlink_relay::config::{Config, Environment};
use gridlink_relay::registry::SessionRegistry;
use gridlink_relay::state::AppState;

/// Test helper: build the application router with a fresh empty registry.
#[must_use]
pub fn test_app() -> Router {
    let state = AppState {
        config: Config {
            server_host: std::net::IpAddr::from([127, 0, 0, 1]),
            server_port: 0,
            environment: Environment::Development,
            log_level: "warn".to_string(),
        },
        registry: SessionRegistry::new(),
    };

    gridlink_relay::routes::router().with_state(state)
}

/// Test helper: send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();

    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, body_str)
}
