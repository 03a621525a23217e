use serde::Deserialize;

/// Main configuration structure for Orbweaver
///
/// Every section has defaults, so a missing config file or a partial one
/// is valid. The `FRONTIER_URL` environment variable overrides the
/// worker's configured frontier address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub frontier: FrontierConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Frontier service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FrontierConfig {
    /// Address the frontier service listens on
    #[serde(rename = "listen-addr")]
    pub listen_addr: String,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Worker crawl loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Base URL of the frontier service
    #[serde(rename = "frontier-url")]
    pub frontier_url: String,

    /// Number of URLs requested per frontier poll
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Backoff between polls when the frontier is empty (milliseconds)
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,

    /// Bound on every HTTP request the worker makes (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            frontier_url: "http://127.0.0.1:8080".to_string(),
            batch_size: 10,
            poll_interval_ms: 3000,
            fetch_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default)]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "orbweaver".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: String::new(),
            contact_email: String::new(),
        }
    }
}

/// Document storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory documents are saved into as JSON files
    #[serde(rename = "data-dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

/// Search API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Address the search API listens on
    #[serde(rename = "listen-addr")]
    pub listen_addr: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8081".to_string(),
        }
    }
}
