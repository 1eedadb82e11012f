//! Web front-end configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BASELINKER_API_TOKEN` - BaseLinker API token (see `fieldhand-baselinker`)
//!
//! ## Optional
//! - `FIELDHAND_HOST` - Bind address (default: 127.0.0.1)
//! - `FIELDHAND_PORT` - Listen port (default: 3080)
//! - `BASELINKER_API_URL` - Connector endpoint override

use std::net::{IpAddr, SocketAddr};

use fieldhand_baselinker::{Config as BaselinkerConfig, ConfigError};

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// BaseLinker connection settings
    pub baselinker: BaselinkerConfig,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// The nested BaseLinker configuration loads `.env` if present, so the
    /// host and port variables may live there too.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the BaseLinker token is missing or invalid,
    /// or if the host/port variables are set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let baselinker = BaselinkerConfig::from_env()?;

        let host = get_env_or_default("FIELDHAND_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FIELDHAND_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("FIELDHAND_PORT", "3080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FIELDHAND_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            host,
            port,
            baselinker,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_socket_addr() {
        let config = WebConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3080,
            baselinker: BaselinkerConfig::new(
                SecretString::from("kU7pQn2wXr9sLb4vTd8cZf3hJm6gYa1e"),
                fieldhand_baselinker::config::DEFAULT_API_URL.parse().unwrap(),
            ),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3080);
    }

    #[test]
    fn test_debug_redacts_nested_token() {
        let config = WebConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3080,
            baselinker: BaselinkerConfig::new(
                SecretString::from("kU7pQn2wXr9sLb4vTd8cZf3hJm6gYa1e"),
                fieldhand_baselinker::config::DEFAULT_API_URL.parse().unwrap(),
            ),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kU7pQn2wXr9sLb4vTd8cZf3hJm6gYa1e"));
    }
}
