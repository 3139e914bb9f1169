use crate::config::Config;
use crate::registry::SessionRegistry;

/// Shared application state available to all request handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub registry: SessionRegistry,
}
