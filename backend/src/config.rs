//! Configuration management for the storefront server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with STOREFRONT__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Where store records and contact submissions live
    pub data_store: DataStoreConfig,

    /// Back-office access
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Which data store implementation to talk to
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataStoreBackend {
    /// Process-local maps, lost on restart
    Memory,
    /// PostgreSQL through sqlx
    Postgres,
    /// Hosted store speaking the PostgREST dialect
    Rest,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataStoreConfig {
    pub backend: DataStoreBackend,

    /// PostgreSQL connection URL
    #[serde(default)]
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Base URL of the hosted store, e.g. https://project.example.co
    #[serde(default)]
    pub rest_url: String,

    /// API key sent as both `apikey` and bearer token
    #[serde(default)]
    pub rest_api_key: String,

    /// Per-request timeout for the hosted store, in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    /// Bearer token required on /api/v1/admin routes; admin access is
    /// refused entirely while this is empty
    #[serde(default)]
    pub api_token: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOREFRONT_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_for(&environment)
    }

    /// Load configuration for a named environment
    pub fn load_for(environment: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("data_store.backend", "memory")?
            .set_default("data_store.max_connections", 10)?
            .set_default("data_store.min_connections", 2)?
            .set_default("data_store.request_timeout_secs", 10)?
            .set_default("admin.api_token", "")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOREFRONT__ prefix)
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            data_store: DataStoreConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DataStoreConfig {
    fn default() -> Self {
        Self {
            backend: DataStoreBackend::Memory,
            database_url: String::new(),
            max_connections: 10,
            min_connections: 2,
            rest_url: String::new(),
            rest_api_key: String::new(),
            request_timeout_secs: 10,
        }
    }
}
