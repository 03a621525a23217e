//! Configuration module for Orbweaver
//!
//! Loads the optional TOML configuration file, applies the `FRONTIER_URL`
//! environment override, and validates the result. Every section has
//! defaults so the services run without any file at all.

mod parser;
mod types;
mod validation;

pub use parser::{
    compute_config_hash, default_config, load_config, load_config_with_hash, FRONTIER_URL_ENV,
};
pub use types::{
    Config, FrontierConfig, SearchConfig, StorageConfig, UserAgentConfig, WorkerConfig,
};
pub use validation::validate;
