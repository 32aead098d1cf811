use std::net::{IpAddr, SocketAddr};

use crate::config::helpers::{optional_env, parse_optional_env};
use crate::error::ConfigError;

/// Number of records shown on the home page.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How many recent records the home view lists.
    pub history_limit: usize,
    /// Transport-level request body cap. `None` disables the limit.
    pub max_body_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_body_bytes: None,
        }
    }
}

impl ServerConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        let host = optional_env("SERVER_HOST")?.unwrap_or_else(|| "127.0.0.1".to_string());
        let port = optional_env("SERVER_PORT")?
            .map(|s| s.parse())
            .transpose()
            .map_err(|e| ConfigError::InvalidValue {
                key: "SERVER_PORT".to_string(),
                message: format!("must be a valid port number: {e}"),
            })?
            .unwrap_or(5000);

        let history_limit = parse_optional_env("HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?;
        let max_body_bytes = optional_env("MAX_BODY_BYTES")?
            .map(|s| s.parse::<usize>())
            .transpose()
            .map_err(|e| ConfigError::InvalidValue {
                key: "MAX_BODY_BYTES".to_string(),
                message: format!("must be a byte count: {e}"),
            })?;

        let config = Self {
            host,
            port,
            history_limit,
            max_body_bytes,
        };
        config.socket_addr()?;
        Ok(config)
    }

    /// Address to bind the listener to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|e| ConfigError::InvalidValue {
            key: "SERVER_HOST".to_string(),
            message: format!("must be an IP address: {e}"),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
