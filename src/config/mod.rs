//! Environment configuration

use crate::core::error::ConfigError;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration, read from the environment
///
/// Variables:
/// - `HOST` — bind address (default `0.0.0.0`)
/// - `PORT` — bind port (default `5000`)
/// - `DATASET_PATH` — optional CSV dataset loaded into the store at startup
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub dataset: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dataset: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    ///
    /// A malformed `PORT` is a hard error: silently falling back to the
    /// default would bind the wrong port without anyone noticing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        if let Ok(host) = std::env::var("HOST") {
            if !host.is_empty() {
                config.host = host;
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            if !port.is_empty() {
                config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                    variable: "PORT".to_string(),
                    value: port.clone(),
                    message: "expected a port number".to_string(),
                })?;
            }
        }

        if let Ok(path) = std::env::var("DATASET_PATH") {
            if !path.is_empty() {
                config.dataset = Some(PathBuf::from(path));
            }
        }

        Ok(config)
    }

    /// Socket address string for the listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
        assert!(config.dataset.is_none());
    }

    #[test]
    fn test_addr_formatting() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dataset: None,
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
