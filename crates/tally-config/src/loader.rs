use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, placeholder expansion
    /// fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::interpolate(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the database section is incomplete or the cache
    /// section is malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_database()?;
        self.validate_cache()?;
        Ok(())
    }

    fn validate_database(&self) -> anyhow::Result<()> {
        if self.database.host.is_empty() {
            anyhow::bail!("database.host must not be empty");
        }
        if self.database.user.is_empty() {
            anyhow::bail!("database.user must not be empty");
        }
        if self.database.name.is_empty() {
            anyhow::bail!("database.name must not be empty");
        }
        if self.database.port == 0 {
            anyhow::bail!("database.port must not be 0");
        }
        Ok(())
    }

    fn validate_cache(&self) -> anyhow::Result<()> {
        let Some(ref cache) = self.cache else {
            return Ok(());
        };

        if cache.url.is_empty() {
            anyhow::bail!("cache.url must not be empty when a cache is configured");
        }
        if cache.ttl_seconds == 0 {
            anyhow::bail!("cache.ttl_seconds must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Config, LogFormat};

    fn parse(raw: &str) -> anyhow::Result<Config> {
        let expanded = crate::env::interpolate(raw).map_err(|e| anyhow::anyhow!(e))?;
        let config: Config = toml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    const MINIMAL: &str = r#"
        [database]
        host = "localhost"
        user = "tally"
        password = "pw"
        name = "tally"
    "#;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config = parse(MINIMAL).unwrap();
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert!(config.cache.is_none());
        assert_eq!(config.database.port, 5432);
    }

    #[test]
    fn empty_database_host_is_rejected() {
        let raw = r#"
            [database]
            host = ""
            user = "tally"
            password = "pw"
            name = "tally"
        "#;
        let err = parse(raw).unwrap_err();
        assert!(err.to_string().contains("database.host"));
    }

    #[test]
    fn zero_cache_ttl_is_rejected() {
        let raw = r#"
            [database]
            host = "localhost"
            user = "tally"
            password = "pw"
            name = "tally"

            [cache]
            url = "redis://localhost:6379"
            ttl_seconds = 0
        "#;
        let err = parse(raw).unwrap_err();
        assert!(err.to_string().contains("cache.ttl_seconds"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let raw = r#"
            [database]
            host = "localhost"
            user = "tally"
            password = "pw"
            name = "tally"
            pool_size = 10
        "#;
        assert!(parse(raw).is_err());
    }

    #[test]
    fn env_placeholder_reaches_the_parsed_value() {
        temp_env::with_var("TALLY_TEST_DB_HOST", Some("db.internal"), || {
            let raw = r#"
                [database]
                host = "{{ env.TALLY_TEST_DB_HOST }}"
                user = "tally"
                password = "pw"
                name = "tally"
            "#;
            let config = parse(raw).unwrap();
            assert_eq!(config.database.host, "db.internal");
        });
    }

    #[test]
    fn log_section_parses() {
        let raw = r#"
            [database]
            host = "localhost"
            user = "tally"
            password = "pw"
            name = "tally"

            [log]
            filter = "debug"
            format = "json"
        "#;
        let config = parse(raw).unwrap();
        let log = config.log.unwrap();
        assert_eq!(log.filter, "debug");
        assert_eq!(log.format, LogFormat::Json);
    }
}
