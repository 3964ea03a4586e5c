//! Server configuration.

use std::net::SocketAddr;

use tracing::warn;

/// Environment variable overriding the bind address.
pub const ADDR_ENV: &str = "SUBWAY_LINE_ADDR";

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Create a new configuration with the given bind address.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(ADDR_ENV).ok())
    }

    fn from_value(addr: Option<String>) -> Self {
        let Some(raw) = addr else {
            return Self::default();
        };

        match raw.parse() {
            Ok(bind_addr) => Self { bind_addr },
            Err(e) => {
                warn!(value = %raw, error = %e, "ignoring invalid {ADDR_ENV}");
                Self::default()
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}
