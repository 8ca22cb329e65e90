//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{endpoints, DEFAULT_PREVIEW_ROWS, DEFAULT_SPEECH_LANGUAGE, MAX_PREVIEW_ROWS};
use crate::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerConfig,

    /// Where the order table comes from
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Restrict CORS to `cors_origins` (false = permissive)
    #[serde(default)]
    pub cors_enabled: bool,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_host() -> String {
    endpoints::DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    endpoints::DEFAULT_PORT
}
fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: false,
            cors_origins: Vec::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Dataset file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// Pick by file extension
    #[default]
    Auto,
    Csv,
    Json,
}

impl DatasetFormat {
    /// Resolve `Auto` against a path; unknown extensions fall back to CSV
    pub fn resolve(self, path: &str) -> DatasetFormat {
        match self {
            DatasetFormat::Auto => {
                let ext = Path::new(path)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_ascii_lowercase());
                match ext.as_deref() {
                    Some("json") => DatasetFormat::Json,
                    _ => DatasetFormat::Csv,
                }
            }
            other => other,
        }
    }
}

/// Dataset source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the exported master schedule
    #[serde(default = "default_dataset_path")]
    pub path: String,

    #[serde(default)]
    pub format: DatasetFormat,

    /// CSV field delimiter
    #[serde(default = "default_delimiter")]
    pub csv_delimiter: char,

    /// Rows returned by the preview endpoint and logged at startup
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_dataset_path() -> String {
    "data/master_schedule.csv".to_string()
}
fn default_delimiter() -> char {
    ','
}
fn default_preview_rows() -> usize {
    DEFAULT_PREVIEW_ROWS
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            format: DatasetFormat::default(),
            csv_delimiter: default_delimiter(),
            preview_rows: default_preview_rows(),
        }
    }
}

/// Voice front end configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Accept recorded questions
    #[serde(default)]
    pub stt_enabled: bool,

    /// Speak answers back
    #[serde(default)]
    pub tts_enabled: bool,

    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_SPEECH_LANGUAGE.to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_enabled: false,
            tts_enabled: false,
            language: default_language(),
        }
    }
}

/// Logging and metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from a single YAML, TOML or JSON file, picked by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let settings: Settings = match ext.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
            _ => {
                return Err(ConfigError::ParseError(format!(
                    "unsupported configuration format: {}",
                    path.display()
                )))
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_dataset()?;
        self.validate_speech()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_production() && server.cors_enabled && server.cors_origins.is_empty()
        {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured. \
                 Browser requests will be limited to localhost."
            );
        }

        Ok(())
    }

    fn validate_dataset(&self) -> Result<(), ConfigError> {
        let dataset = &self.dataset;

        if dataset.path.trim().is_empty() {
            if self.environment.is_strict() {
                return Err(ConfigError::InvalidValue {
                    field: "dataset.path".to_string(),
                    message: "A dataset path is required".to_string(),
                });
            }
            tracing::warn!("dataset.path is empty; the server will start without data");
        }

        if !dataset.csv_delimiter.is_ascii() {
            return Err(ConfigError::InvalidValue {
                field: "dataset.csv_delimiter".to_string(),
                message: format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    dataset.csv_delimiter
                ),
            });
        }

        if dataset.preview_rows == 0 || dataset.preview_rows > MAX_PREVIEW_ROWS {
            return Err(ConfigError::InvalidValue {
                field: "dataset.preview_rows".to_string(),
                message: format!(
                    "Must be between 1 and {}, got {}",
                    MAX_PREVIEW_ROWS, dataset.preview_rows
                ),
            });
        }

        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        if self.speech.language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "speech.language".to_string(),
                message: "Language code cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Expected one of {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    self.observability.log_level
                ),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (`ORDER_DESK__<SECTION>__<KEY>`, e.g. `ORDER_DESK__SERVER__PORT`)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Same as [`load_settings`] with an explicit configuration directory
pub fn load_settings_from(dir: impl AsRef<Path>, env: Option<&str>) -> Result<Settings, ConfigError> {
    let dir = dir.as_ref();
    let mut builder = Config::builder();

    let default_path = dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_path = dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("ORDER_DESK")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
