use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::Config;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIRECTORY_ENV: &str = "IONIC_CONFIG_DIRECTORY";

/// File name of the configuration inside its directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {source}")]
    SerializeError {
        #[source]
        source: toml::ser::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// `IONIC_CONFIG_DIRECTORY` in `env` wins; otherwise
    /// `~/.config/ionic/config.toml` on Unix or the platform equivalent via
    /// `dirs::config_dir()`, falling back to the current directory.
    pub fn config_path(env: &HashMap<String, String>) -> PathBuf {
        let dir = match env.get(CONFIG_DIRECTORY_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .map(|d| d.join("ionic"))
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        dir.join(CONFIG_FILE_NAME)
    }

    /// Loads configuration from a specific path.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse and validate TOML content read from `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize to the on-disk TOML form.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError { source: e })
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `urls.api` is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let api = &self.urls.api;
        let parsed = reqwest::Url::parse(api).map_err(|e| ConfigError::ValidationError {
            message: format!("urls.api '{}' is not a valid URL: {}", api, e),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!("urls.api '{}' must use http or https", api),
            });
        }

        Ok(())
    }
}
