//! Service configuration.
//!
//! Retry behavior and the default still-image format live here so the
//! CLI and embedding applications can tune them from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default MIME type for still captures.
pub const DEFAULT_MIME_TYPE: &str = "image/webp";

/// Configuration for the media service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Extra acquisition attempts after a transient failure.
    pub retry_count: u32,
    /// Fixed delay between acquisition attempts, in milliseconds.
    pub retry_delay_ms: u64,
    /// MIME type used for still captures when none is given.
    pub mime_type: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            retry_count: 10,
            retry_delay_ms: 100,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        }
    }
}

impl MediaConfig {
    /// Returns the retry delay as a duration.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mime_type.starts_with("image/") || self.mime_type.len() == "image/".len() {
            return Err(ConfigError::InvalidMimeType(self.mime_type.clone()));
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// MIME type is not an `image/*` type.
    #[error("invalid image MIME type: {0}")]
    InvalidMimeType(String),
    /// Snapshot interval is zero.
    #[error("snapshot interval must be non-zero")]
    InvalidInterval,
    /// Config file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// Config file is not valid TOML for this format.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Stream acquisition and capture settings.
    #[serde(default)]
    pub media: MediaConfig,
    /// CLI output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that snapshots are written to.
    pub directory: PathBuf,
    /// Interval between snapshots in watch mode, in milliseconds.
    pub snapshot_interval_ms: u64,
    /// Metrics server port (0 to disable).
    pub metrics_port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            snapshot_interval_ms: 1000,
            metrics_port: 9090,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.media.validate()?;
        if config.output.snapshot_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(config)
    }
}
