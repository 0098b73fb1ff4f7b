//! Configuration for the Vigil API server.
//!
//! Supports configuration via environment variables.

use std::net::SocketAddr;

use tracing::info;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server address
    pub http_addr: SocketAddr,
    /// Log level
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            log_level: "info,vigil_api=debug".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("VIGIL_API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let host = std::env::var("VIGIL_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let http_addr = format!("{host}:{port}")
            .parse()
            .unwrap_or_else(|_| Self::default().http_addr);

        Self {
            http_addr,
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,vigil_api=debug".to_string()),
        }
    }

    /// Log the configuration at startup.
    pub fn log_startup(&self) {
        info!("Vigil API configuration:");
        info!("  HTTP server: {}", self.http_addr);
    }
}
