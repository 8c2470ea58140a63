#![allow(clippy::must_use_candidate)]

pub mod cache;
pub mod database;
mod env;
pub mod health;
mod loader;
pub mod log;
pub mod server;

use serde::Deserialize;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use health::HealthConfig;
pub use log::{LogConfig, LogFormat};
pub use server::ServerConfig;

/// Top-level tally configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Connection parameters for the external storage layer
    pub database: DatabaseConfig,
    /// Cache client configuration; the service runs uncached when absent
    #[serde(default)]
    pub cache: Option<CacheConfig>,
    /// Logging configuration
    #[serde(default)]
    pub log: Option<LogConfig>,
}
