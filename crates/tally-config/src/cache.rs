use serde::Deserialize;

/// Valkey cache client configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Connection URL, e.g. `redis://127.0.0.1:6379`
    pub url: String,
    /// Key namespace; defaults to `tally:cache`
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Default entry TTL
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

const fn default_ttl_seconds() -> u64 {
    300
}
