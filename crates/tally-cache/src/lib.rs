//! Valkey-backed cache client for tally
//!
//! The client is registered once at process startup and shared through the
//! router state. Values are stored as JSON under prefix-namespaced keys;
//! caller-supplied key material is hashed so arbitrary input never reaches
//! the keyspace verbatim.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Valkey connection or command error
    #[error("cache backend: {0}")]
    Backend(String),
    /// Serialization error
    #[error("serialization: {0}")]
    Serialization(String),
}

/// Cache client backed by Valkey
#[derive(Clone, Debug)]
pub struct Cache {
    client: redis::Client,
    default_ttl: Duration,
    key_prefix: String,
}

impl Cache {
    /// Create a new cache client
    ///
    /// # Errors
    ///
    /// Returns an error if the Valkey URL is invalid
    pub fn new(url: &str, default_ttl: Duration, key_prefix: Option<String>) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(|e| CacheError::Backend(format!("invalid URL: {e}")))?;

        Ok(Self {
            client,
            default_ttl,
            key_prefix: key_prefix.unwrap_or_else(|| "tally:cache".to_owned()),
        })
    }

    /// Startup registration check: open a connection and ping the server
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or the ping fails
    pub async fn verify(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Backend(format!("PING failed: {e}")))?;
        Ok(())
    }

    /// Look up a cached value
    ///
    /// # Errors
    ///
    /// Returns an error on connection or deserialization failure
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        use redis::AsyncCommands;

        let mut conn = self.connection().await?;

        let namespaced = self.namespaced(key);
        let result: Option<String> = conn
            .get(&namespaced)
            .await
            .map_err(|e| CacheError::Backend(format!("GET failed: {e}")))?;

        if let Some(data) = result {
            let value: T =
                serde_json::from_str(&data).map_err(|e| CacheError::Serialization(format!("deserialize: {e}")))?;
            tracing::debug!(key, "cache hit");
            Ok(Some(value))
        } else {
            tracing::debug!(key, "cache miss");
            Ok(None)
        }
    }

    /// Store a value with an optional per-entry TTL
    ///
    /// # Errors
    ///
    /// Returns an error on connection or serialization failure
    pub async fn put<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<(), CacheError> {
        use redis::AsyncCommands;

        let mut conn = self.connection().await?;

        let namespaced = self.namespaced(key);
        let data = serde_json::to_string(value).map_err(|e| CacheError::Serialization(format!("serialize: {e}")))?;

        let ttl_secs = ttl.unwrap_or(self.default_ttl).as_secs();
        let _: () = conn
            .set_ex(&namespaced, &data, ttl_secs)
            .await
            .map_err(|e| CacheError::Backend(format!("SET failed: {e}")))?;

        tracing::debug!(key, ttl_secs, "cached value");
        Ok(())
    }

    /// Drop a cached value
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        use redis::AsyncCommands;

        let mut conn = self.connection().await?;

        let namespaced = self.namespaced(key);
        let _: () = conn
            .del(&namespaced)
            .await
            .map_err(|e| CacheError::Backend(format!("DEL failed: {e}")))?;

        Ok(())
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, CacheError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Backend(format!("connection failed: {e}")))
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{key}", self.key_prefix)
    }
}

/// Hash caller-supplied key material into a fixed-width hex key
#[must_use]
pub fn hashed_key(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}
