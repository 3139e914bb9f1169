use std::net::{IpAddr, SocketAddr};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional with defaults: `SERVER_HOST` (default
    /// `0.0.0.0`, the relay accepts connections from any interface),
    /// `SERVER_PORT` (default `8080`), `ENVIRONMENT`, `LOG_LEVEL`.
    ///
    /// On Railway, `PORT` overrides `SERVER_PORT`.
    ///
    /// # Errors
    ///
    /// Returns an error if `SERVER_HOST` / `SERVER_PORT` contain invalid
    /// values.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        // Railway provides PORT; fall back to SERVER_PORT, then 8080
        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT must be a valid u16"))?;

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST must be a valid IP address"))?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server_host,
            server_port,
            environment,
            log_level,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}
