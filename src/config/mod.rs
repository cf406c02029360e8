//! Configuration management for the relay
//!
//! Loads defaults, optional config files and environment variables via .env

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CREDENTIALS_PATH: &str = "headers.json";
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.binance.com";
pub const DEFAULT_TRADE_TYPE: &str = "PERPETUAL";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Listen port (`PORT` overrides)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the Credential Set
    pub credentials_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credentials_path: DEFAULT_CREDENTIALS_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Leaderboard API origin
    pub base_url: String,
    /// `tradeType` sent with position and performance lookups
    pub trade_type: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            trade_type: DEFAULT_TRADE_TYPE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Server defaults
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            // Storage defaults
            .set_default("storage.credentials_path", DEFAULT_CREDENTIALS_PATH)?
            // Upstream defaults
            .set_default("upstream.base_url", DEFAULT_UPSTREAM_URL)?
            .set_default("upstream.trade_type", DEFAULT_TRADE_TYPE)?
            .set_default("upstream.timeout_ms", DEFAULT_TIMEOUT_MS as i64)?
            // Logging defaults
            .set_default("logging.json", false)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (RELAY__*)
            .add_source(Environment::with_prefix("RELAY").separator("__"))
            // Plain PORT, as most hosting platforms inject it
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(app_config)
    }

    /// Generate a digest of the config (without secrets) for logging
    pub fn digest(&self) -> String {
        format!(
            "bind={} credentials={} upstream={} trade_type={} timeout_ms={}",
            self.server.bind_addr(),
            self.storage.credentials_path,
            self.upstream.base_url,
            self.upstream.trade_type,
            self.upstream.timeout_ms
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
