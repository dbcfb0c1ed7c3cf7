//! Configuration loader for the `pm-monitor` backend service.
//!
//! All runtime settings are read here, once, from environment variables
//! (with optional `.env` support provided by the caller), so the rest of
//! the crate never calls `env::var` directly.
use std::{env, time::Duration};

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u64 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Spreadsheet link or direct CSV URL.
    pub sheet_url: String,

    /// Freshness window for the fetched table.
    pub sheet_ttl: Duration,

    /// Timeout for a single fetch.
    pub fetch_timeout: Duration,

    /// HTTP listen port.
    pub http_port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `SHEET_URL` – spreadsheet link or CSV URL
///
/// Optional:
/// - `SHEET_TTL_SECS` – cache freshness window (default: 5)
/// - `FETCH_TIMEOUT_SECS` – per-fetch timeout (default: 10)
/// - `HTTP_PORT` – listen port (default: 8080)
pub fn load_from_env() -> Result<Config> {
    // ---
    let sheet_url = require_env!("SHEET_URL");
    if sheet_url.trim().is_empty() {
        return Err(anyhow!("SHEET_URL must not be empty"));
    }
    let sheet_ttl = Duration::from_secs(parse_env_u64!("SHEET_TTL_SECS", 5));
    let fetch_timeout = Duration::from_secs(parse_env_u64!("FETCH_TIMEOUT_SECS", 10));
    let http_port = u16::try_from(parse_env_u64!("HTTP_PORT", 8080))
        .map_err(|e| anyhow!("Invalid HTTP_PORT: {}", e))?;

    Ok(Config {
        sheet_url,
        sheet_ttl,
        fetch_timeout,
        http_port,
    })
}

impl Config {
    /// Log the loaded configuration at startup.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  SHEET_URL          : {}", self.sheet_url);
        tracing::info!("  SHEET_TTL_SECS     : {}", self.sheet_ttl.as_secs());
        tracing::info!("  FETCH_TIMEOUT_SECS : {}", self.fetch_timeout.as_secs());
        tracing::info!("  HTTP_PORT          : {}", self.http_port);
    }
}
