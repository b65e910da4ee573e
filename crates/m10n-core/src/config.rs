//! Application configuration
//!
//! Centralized configuration management using the `config` crate.
//! Configuration is loaded from defaults, optional config files, and
//! `M10N__`-prefixed environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Balance snapshot lifetime applied when none is configured (10 minutes)
pub const DEFAULT_BALANCE_TTL: u64 = 600;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub apigee: ApigeeConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub balance: BalanceConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub add_credit: AddCreditConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma-separated allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Upstream billing API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ApigeeConfig {
    /// Base URL of the monetization API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Organization name
    pub organization: String,

    /// OAuth2 bearer token used for upstream calls
    pub access_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://apigee.googleapis.com/v1".to_string()
}

fn default_upstream_timeout() -> u64 {
    30
}

/// Redis configuration
///
/// When no URL is configured the portal falls back to the in-process store.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: Option<String>,
}

/// Prepaid balance cache configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BalanceConfig {
    /// TTL for cached balance snapshots in seconds. `0` disables caching
    /// entirely: every request goes straight to the billing API.
    #[serde(default = "default_balance_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_balance_ttl() -> u64 {
    DEFAULT_BALANCE_TTL
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_balance_ttl(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// JWT signing secret (tokens are minted by the portal SSO)
    pub jwt_secret: String,

    /// JWT token expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_secs: i64,
}

fn default_jwt_expiration() -> i64 {
    1800
}

/// Add-credit product planning configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AddCreditConfig {
    /// Currency codes that already have an add-credit product configured
    /// in the commerce layer.
    #[serde(default)]
    pub configured_products: Vec<String>,
}

impl AppConfig {
    /// Load configuration from defaults, optional files, and environment
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default(
                "server.cors_origins",
                "http://localhost:3000,http://127.0.0.1:3000",
            )?
            .set_default("apigee.base_url", "https://apigee.googleapis.com/v1")?
            .set_default("apigee.timeout_secs", 30)?
            .set_default("balance.cache_ttl_secs", DEFAULT_BALANCE_TTL)?
            .set_default("auth.jwt_expiration_secs", 1800)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with M10N_ prefix
            .add_source(
                Environment::with_prefix("M10N")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("M10N").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
