use std::time::Duration;

use axum::Router;
use axum::http::Request;
use axum::response::Response;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use gridlink_relay::config::Config;
use gridlink_relay::registry::SessionRegistry;
use gridlink_relay::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize structured logging
    init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "Starting Gridlink relay"
    );

    // Build application state: the registry starts empty, sessions only
    // enter and leave it through its own operations.
    let state = AppState {
        config: config.clone(),
        registry: SessionRegistry::new(),
    };

    // Build the application with middleware
    let app = build_app(state);

    // Start the server
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full application router with all middleware layers.
fn build_app(state: AppState) -> Router {
    // Browser clients connect from extension pages and arbitrary origins.
    let cors = CorsLayer::permissive();

    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                status_code = tracing::field::Empty,
            )
        })
        .on_response(|response: &Response, latency: Duration, span: &Span| {
            span.record("status_code", response.status().as_u16());
            tracing::info!(latency_ms = latency.as_millis(), "response");
        });

    gridlink_relay::routes::router()
        .with_state(state)
        .layer(cors)
        .layer(trace)
}

/// Initialize the `tracing` subscriber with an environment-based filter.
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("gridlink_relay={log_level},tower_http=info").into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
