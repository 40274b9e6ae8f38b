//! Environment-driven configuration
//!
//! Both node modes read their settings from the process environment
//! (optionally seeded from a `.env` file). Nothing here is hot-reloadable;
//! every value is read once at startup.

use std::env;
use std::time::Duration;

use crate::errors::{Result, ShortgateError};

/// Default listen port for the storage node.
pub const DEFAULT_STORAGE_PORT: u16 = 8001;
/// Default listen port for the gateway.
pub const DEFAULT_GATEWAY_PORT: u16 = 8000;
/// Default bounded timeout for gateway → storage calls.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 3;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ShortgateError::config(format!("invalid value for {}: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

/// Storage node configuration
#[derive(Clone, Debug)]
pub struct StorageNodeConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub pool_size: u32,
}

impl StorageNodeConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("SERVER_HOST", "127.0.0.1"),
            port: parse_env("SERVER_PORT", DEFAULT_STORAGE_PORT)?,
            database_url: env_or("DATABASE_URL", "sqlite://shortgate.db?mode=rwc"),
            pool_size: parse_env("DATABASE_POOL_SIZE", 10)?,
        })
    }
}

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the storage node, e.g. `http://127.0.0.1:8001`.
    pub storage_base_url: String,
    /// Total timeout for one outbound call to the storage node.
    pub upstream_timeout: Duration,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let timeout_secs: u64 = parse_env("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ShortgateError::config(
                "UPSTREAM_TIMEOUT_SECS must be at least 1",
            ));
        }
        Ok(Self {
            host: env_or("SERVER_HOST", "127.0.0.1"),
            port: parse_env("SERVER_PORT", DEFAULT_GATEWAY_PORT)?,
            storage_base_url: env_or("STORAGE_BASE_URL", "http://127.0.0.1:8001"),
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Logging configuration shared by both modes
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string, e.g. `info` or `shortgate=debug`.
    pub level: String,
    /// `text` or `json`.
    pub format: String,
    /// Log file path; empty or unset means stdout.
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env_or("LOG_LEVEL", "info"),
            format: env_or("LOG_FORMAT", "text"),
            file: env::var("LOG_FILE").ok().filter(|f| !f.is_empty()),
        }
    }
}
