use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sync::ApiVersion;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the ficha API
    pub api_url: ConfigValue<String>,
    /// Wire generation of the list endpoint
    pub api_version: ConfigValue<ApiVersion>,
    /// Per-request timeout
    pub timeout_secs: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    api_version: Option<ApiVersion>,
    timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: ConfigValue::new(DEFAULT_API_URL.to_string(), ConfigSource::Default),
            api_version: ConfigValue::new(ApiVersion::default(), ConfigSource::Default),
            timeout_secs: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
            config_file: None,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config.config_file = Some(path.clone());

            if let Some(url) = file_config.api_url {
                config.api_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(version) = file_config.api_version {
                config.api_version = ConfigValue::new(version, ConfigSource::File);
            }
            if let Some(timeout) = file_config.timeout_secs {
                config.timeout_secs = ConfigValue::new(timeout, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("FICHAS_API_URL") {
            config.api_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(version) = std::env::var("FICHAS_API_VERSION") {
            let version = version
                .parse::<ApiVersion>()
                .map_err(|e| ConfigError::InvalidEnv("FICHAS_API_VERSION", e))?;
            config.api_version = ConfigValue::new(version, ConfigSource::Environment);
        }
        if let Ok(timeout) = std::env::var("FICHAS_TIMEOUT_SECS") {
            let timeout = timeout.parse::<u64>().map_err(|_| {
                ConfigError::InvalidEnv(
                    "FICHAS_TIMEOUT_SECS",
                    format!("'{}' is not a number of seconds", timeout),
                )
            })?;
            config.timeout_secs = ConfigValue::new(timeout, ConfigSource::Environment);
        }

        Ok(config)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/fichas/
    /// - macOS: ~/Library/Application Support/fichas/
    /// - Windows: %APPDATA%/fichas/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fichas")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidEnv(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidEnv(var, e) => {
                write!(f, "Invalid value for {}: {}", var, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
