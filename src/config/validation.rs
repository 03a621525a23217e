use crate::config::types::Config;
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates a loaded configuration
///
/// Checks that listen addresses and the frontier URL parse, that the
/// worker's sizes and timeouts are positive, and that identity and
/// storage fields are non-empty.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_listen_addr("frontier.listen-addr", &config.frontier.listen_addr)?;
    validate_listen_addr("search.listen-addr", &config.search.listen_addr)?;

    let frontier_url = Url::parse(&config.worker.frontier_url).map_err(|e| {
        ConfigError::Validation(format!(
            "worker.frontier-url is not a valid URL ({}): {}",
            config.worker.frontier_url, e
        ))
    })?;
    if frontier_url.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "worker.frontier-url has no host: {}",
            config.worker.frontier_url
        )));
    }

    if config.worker.batch_size == 0 {
        return Err(ConfigError::Validation(
            "worker.batch-size must be at least 1".to_string(),
        ));
    }
    if config.worker.poll_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "worker.poll-interval-ms must be at least 1".to_string(),
        ));
    }
    if config.worker.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "worker.fetch-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.user_agent.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.crawler-name must not be empty".to_string(),
        ));
    }
    if config.storage.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "storage.data-dir must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_listen_addr(field: &str, addr: &str) -> Result<(), ConfigError> {
    addr.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("{} is not a valid socket address ({}): {}", field, addr, e))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = Config::default();
        config.worker.batch_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_fetch_timeout_rejected() {
        let mut config = Config::default();
        config.worker.fetch_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_frontier_url_rejected() {
        let mut config = Config::default();
        config.worker.frontier_url = "not a url".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_listen_addr_rejected() {
        let mut config = Config::default();
        config.frontier.listen_addr = "localhost".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_crawler_name_rejected() {
        let mut config = Config::default();
        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_data_dir_rejected() {
        let mut config = Config::default();
        config.storage.data_dir = String::new();
        assert!(validate(&config).is_err());
    }
}
