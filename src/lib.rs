//! Orbweaver: a distributed web crawler
//!
//! This crate implements a crawl coordinated through a shared frontier
//! service: workers take batches of URLs from the frontier over HTTP,
//! enforce robots.txt politeness through a per-domain permission cache,
//! fetch and parse pages, feed finished documents to the index and storage
//! sinks, and send discovered links back to the frontier.

pub mod api;
pub mod config;
pub mod crawler;
pub mod document;
pub mod frontier;
pub mod index;
pub mod robots;
pub mod storage;

use thiserror::Error;

/// Main error type for Orbweaver operations
#[derive(Debug, Error)]
pub enum OrbError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL has no host: {url}")]
    MissingHost { url: String },

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Frontier returned status {status}")]
    FrontierStatus { status: u16 },

    #[error("Received status {status} fetching robots.txt from {authority}")]
    RobotsStatus { authority: String, status: u16 },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Orbweaver operations
pub type Result<T> = std::result::Result<T, OrbError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use document::Document;
pub use frontier::Frontier;
pub use robots::RobotsCache;
