//! TOML Configuration File Support
//!
//! The widget reads an optional TOML file at
//! `$XDG_CONFIG_HOME/claim-saathi/widget.toml`.
//!
//! # Configuration Priority
//!
//! Highest first:
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [assistant]
//! endpoint = "http://localhost:5005/api/ask-gemini"
//! timeout_secs = 30
//!
//! [session]
//! storage_dir = "/home/me/.local/share/claim-saathi/session"
//! user_id = "42"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::DEFAULT_ENDPOINT;
use crate::identity::UserId;

/// Environment variable overriding the assistant endpoint
pub const ENV_ENDPOINT: &str = "SAATHI_ENDPOINT";
/// Environment variable setting a request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "SAATHI_TIMEOUT_SECS";
/// Environment variable overriding the session storage directory
pub const ENV_STORAGE_DIR: &str = "SAATHI_STORAGE_DIR";
/// Environment variable providing the signed-in user id
pub const ENV_USER_ID: &str = "SAATHI_USER_ID";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Command-line argument
    Cli,
    /// Environment variable
    Env,
    /// TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[assistant]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantToml {
    /// Assistant endpoint URL
    pub endpoint: Option<String>,

    /// Request timeout in seconds (absent = no timeout)
    pub timeout_secs: Option<u64>,
}

/// `[session]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionToml {
    /// Directory holding session storage files
    pub storage_dir: Option<PathBuf>,

    /// Signed-in user id (acts as the auth context)
    pub user_id: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetToml {
    /// Assistant section
    pub assistant: AssistantToml,

    /// Session section
    pub session: SessionToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved widget configuration
#[derive(Clone, Debug)]
pub struct WidgetConfig {
    /// Assistant endpoint URL
    pub endpoint: String,

    /// Per-request timeout (`None` waits indefinitely)
    pub request_timeout: Option<Duration>,

    /// Session storage directory (`None` = platform default)
    pub storage_dir: Option<PathBuf>,

    /// User id supplied by the auth layer
    pub user_id: Option<UserId>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
            storage_dir: None,
            user_id: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl WidgetConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest-priority layer that contributed a value
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values for consistency
    ///
    /// # Errors
    ///
    /// Rejects non-HTTP endpoints and a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        let has_scheme = endpoint.starts_with("http://") || endpoint.starts_with("https://");
        let has_host = endpoint
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.is_empty() && !rest.starts_with('/'));
        if !has_scheme || !has_host {
            return Err(ConfigError::ValidationError(format!(
                "endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ValidationError(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Default configuration file path
///
/// `$XDG_CONFIG_HOME/claim-saathi/widget.toml`, typically
/// `~/.config/claim-saathi/widget.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("claim-saathi").join("widget.toml"))
}

/// Default log file location
///
/// `$XDG_DATA_HOME/claim-saathi/saathi-tui.log`, typically
/// `~/.local/share/claim-saathi/saathi-tui.log`.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("claim-saathi").join("saathi-tui.log"))
}

/// Load configuration from the default path and the process environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the merged values are invalid. A missing file is not an error.
pub fn load_config() -> Result<WidgetConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the process environment
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the merged
/// values are invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<WidgetConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<WidgetConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = WidgetConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: WidgetToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env)?;
    config.validate()?;

    Ok(config)
}

fn apply_toml_config(config: &mut WidgetConfig, toml: &WidgetToml) {
    if let Some(ref endpoint) = toml.assistant.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(secs) = toml.assistant.timeout_secs {
        config.request_timeout = Some(Duration::from_secs(secs));
    }
    if toml.session.storage_dir.is_some() {
        config.storage_dir = toml.session.storage_dir.clone();
    }
    if let Some(ref user_id) = toml.session.user_id {
        config.user_id = UserId::new(user_id.clone());
    }
}

fn apply_env_config<F>(config: &mut WidgetConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = env(ENV_ENDPOINT) {
        config.endpoint = endpoint;
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = env(ENV_TIMEOUT_SECS) {
        let secs = timeout.trim().parse::<u64>().map_err(|_| {
            ConfigError::ValidationError(format!("{ENV_TIMEOUT_SECS} must be a number, got {timeout:?}"))
        })?;
        config.request_timeout = Some(Duration::from_secs(secs));
        config.source = ConfigSource::Env;
    }
    if let Some(dir) = env(ENV_STORAGE_DIR) {
        config.storage_dir = Some(PathBuf::from(dir));
        config.source = ConfigSource::Env;
    }
    if let Some(user_id) = env(ENV_USER_ID) {
        config.user_id = UserId::new(user_id);
        config.source = ConfigSource::Env;
    }
    Ok(())
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Command-line overrides, applied after [`load_config`]
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Endpoint override
    pub endpoint: Option<String>,

    /// Timeout override (seconds)
    pub timeout_secs: Option<u64>,

    /// Storage directory override
    pub storage_dir: Option<PathBuf>,

    /// User id override
    pub user_id: Option<String>,
}

impl ConfigOverrides {
    /// Create an empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint override
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set timeout override
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set storage directory override
    #[must_use]
    pub fn with_storage_dir(mut self, dir: PathBuf) -> Self {
        self.storage_dir = Some(dir);
        self
    }

    /// Set user id override
    #[must_use]
    pub fn with_user_id(mut self, user_id: String) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Apply overrides to a configuration and re-validate it
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden values are invalid.
    pub fn apply(&self, config: &mut WidgetConfig) -> Result<(), ConfigError> {
        if self.endpoint.is_some()
            || self.timeout_secs.is_some()
            || self.storage_dir.is_some()
            || self.user_id.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref endpoint) = self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(ref dir) = self.storage_dir {
            config.storage_dir = Some(dir.clone());
        }
        if let Some(ref user_id) = self.user_id {
            config.user_id = UserId::new(user_id.clone());
        }

        config.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================
