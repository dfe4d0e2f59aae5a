//! Configuration management for the OpenPhone MCP adapter.
//!
//! Configuration is read once from environment variables at startup and then
//! handed to the client and server by value. A `.env` file is loaded if present.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Fixed base URL of the upstream OpenPhone REST API.
pub const OPENPHONE_API_BASE_URL: &str = "https://api.openphone.com/v1";

/// Configuration for the adapter service.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenPhone API key, sent verbatim in the `Authorization` header
    pub openphone_api_key: String,

    /// Upstream base URL (fixed in production, overridable for tests)
    pub openphone_api_url: String,

    /// Address to bind the HTTP listener to (default: "0.0.0.0")
    pub host: String,

    /// Port to listen on (default: 3001)
    pub port: u16,

    /// Per-call upstream timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENPHONE_API_KEY`: API key for the upstream service
    ///
    /// Optional environment variables:
    /// - `PORT`: Listening port (default: 3001)
    /// - `HOST`: Bind address (default: "0.0.0.0")
    /// - `REQUEST_TIMEOUT`: Upstream timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let openphone_api_key = env::var("OPENPHONE_API_KEY")
            .map_err(|_| ConfigError::MissingVar("OPENPHONE_API_KEY".to_string()))?;

        if openphone_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "OPENPHONE_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let port = Self::parse_env_u16("PORT", 3001)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            openphone_api_key,
            openphone_api_url: OPENPHONE_API_BASE_URL.to_string(),
            host,
            port,
            request_timeout,
            log_level,
        })
    }

    /// The `host:port` string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a port number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openphone_api_key: String::new(),
            openphone_api_url: OPENPHONE_API_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 3001,
            request_timeout: 10,
            log_level: "info".to_string(),
        }
    }
}
