use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable that overrides the worker's frontier address.
pub const FRONTIER_URL_ENV: &str = "FRONTIER_URL";

/// Loads and parses a configuration file from the given path
///
/// The `FRONTIER_URL` environment variable, when set and non-empty,
/// overrides the configured frontier address.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;
    apply_env_overrides(&mut config);

    validate(&config)?;

    Ok(config)
}

/// Returns the built-in default configuration with environment overrides
/// applied, for running without a config file.
pub fn default_config() -> Result<Config, ConfigError> {
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(frontier_url) = std::env::var(FRONTIER_URL_ENV) {
        if !frontier_url.is_empty() {
            config.worker.frontier_url = frontier_url;
        }
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Used to record which configuration a crawl ran with.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            [frontier]
            listen-addr = "127.0.0.1:9000"

            [worker]
            frontier-url = "http://frontier.internal:9000"
            batch-size = 5
            poll-interval-ms = 500
            fetch-timeout-secs = 4

            [user-agent]
            crawler-name = "TestBot"
            crawler-version = "2.0"
            contact-url = "https://example.com/bot"
            contact-email = "bot@example.com"

            [storage]
            data-dir = "/tmp/docs"

            [search]
            listen-addr = "127.0.0.1:9001"
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.frontier.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.worker.frontier_url, "http://frontier.internal:9000");
        assert_eq!(config.worker.batch_size, 5);
        assert_eq!(config.worker.poll_interval_ms, 500);
        assert_eq!(config.worker.fetch_timeout_secs, 4);
        assert_eq!(config.user_agent.crawler_name, "TestBot");
        assert_eq!(config.storage.data_dir, "/tmp/docs");
        assert_eq!(config.search.listen_addr, "127.0.0.1:9001");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let file = write_config(
            r#"
            [worker]
            frontier-url = "http://10.0.0.1:8080"
            batch-size = 20
            poll-interval-ms = 3000
            fetch-timeout-secs = 10
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.worker.batch_size, 20);
        // Untouched sections keep their defaults
        assert_eq!(config.frontier.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.storage.data_dir, "data");
        assert_eq!(config.user_agent.crawler_name, "orbweaver");
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let file = write_config("this is not toml {{{");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/orbweaver.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = default_config().unwrap();
        assert_eq!(config.worker.batch_size, 10);
        assert_eq!(config.worker.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_config_hash_is_stable() {
        let file = write_config("[worker]\nbatch-size = 10\nfrontier-url = \"http://x:1\"\npoll-interval-ms = 1\nfetch-timeout-secs = 1\n");
        let first = compute_config_hash(file.path()).unwrap();
        let second = compute_config_hash(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }
}
