//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use tally_config::{CacheConfig, Config, DatabaseConfig, HealthConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                database: DatabaseConfig {
                    host: "localhost".to_owned(),
                    port: 5432,
                    user: "tally".to_owned(),
                    password: SecretString::from("test-password"),
                    name: "tally_test".to_owned(),
                },
                cache: None,
                log: None,
            },
        }
    }

    /// Point the cache client at the given URL
    pub fn with_cache(mut self, url: &str) -> Self {
        self.config.cache = Some(CacheConfig {
            url: url.to_owned(),
            key_prefix: Some("tally:test".to_owned()),
            ttl_seconds: 60,
        });
        self
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
