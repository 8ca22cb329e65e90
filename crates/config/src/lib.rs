//! Configuration management for the order desk
//!
//! Supports loading configuration from:
//! - YAML/TOML files under `config/`
//! - Environment variables such as `ORDER_DESK__SERVER__PORT` (prefix `ORDER_DESK`,
//!   `__` between the prefix and each section)
//!
//! The dataset schema (column names, component vocabulary) is fixed and lives in
//! [`constants`].

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, load_settings_from, DatasetConfig, DatasetFormat, ObservabilityConfig,
    RuntimeEnvironment, ServerConfig, Settings, SpeechConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(path) => ConfigError::FileNotFound(path),
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}
