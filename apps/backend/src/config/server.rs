//! HTTP server settings.

use std::env;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Grace period for in-flight requests after a shutdown signal
    pub shutdown_timeout: Duration,
    /// Deadline for a client to finish sending request headers
    pub client_request_timeout: Duration,
    pub keep_alive: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: Duration::from_secs(15),
            client_request_timeout: Duration::from_secs(5),
            keep_alive: Duration::from_secs(5),
        }
    }
}

impl ServerConfig {
    /// Read settings from `BACKEND_*` variables, falling back to defaults for
    /// anything unset. Set-but-unparseable values are an error.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("BACKEND_HOST").unwrap_or(defaults.host),
            port: parse_var("BACKEND_PORT")?.unwrap_or(defaults.port),
            shutdown_timeout: parse_var("BACKEND_SHUTDOWN_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.shutdown_timeout),
            client_request_timeout: parse_var("BACKEND_CLIENT_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.client_request_timeout),
            keep_alive: parse_var("BACKEND_KEEP_ALIVE_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.keep_alive),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(_) => Ok(None),
    }
}
