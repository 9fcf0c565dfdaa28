//! Configuration management for `viewmux`
//!
//! This module provides the [`ConfigManager`] for loading and saving the
//! host-facing settings file in TOML format: the display settings applied
//! to newly created views, and the logging level.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view::DisplaySettings;

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined
    #[error("Could not determine the configuration directory")]
    NoConfigDir,

    /// Reading or writing the config file failed
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Logging-related settings persisted alongside the display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level name, parsed by
    /// [`TracingLevel`](crate::tracing::TracingLevel) at startup.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// The persisted application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Display settings applied to newly created views.
    #[serde(default)]
    pub display: DisplaySettings,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Loads and saves [`AppSettings`] as TOML under the platform config
/// directory (`<config_dir>/viewmux/settings.toml`).
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager rooted at the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] when the platform provides no
    /// config directory.
    pub fn new() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(dir.join("viewmux")))
    }

    /// Creates a manager rooted at an explicit directory. Used by tests and
    /// hosts with their own config layout.
    #[must_use]
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_path: dir.into().join("settings.toml"),
        }
    }

    /// Returns the path of the settings file.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the settings, falling back to defaults when the file does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<AppSettings, ConfigError> {
        let _span = crate::trace_operation_debug!("config.load").entered();
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no settings file, using defaults");
            return Ok(AppSettings::default());
        }
        let raw = fs::read_to_string(&self.config_path)?;
        let settings = toml::from_str(&raw)?;
        tracing::debug!(path = %self.config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Saves the settings, creating the config directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or writing fails.
    pub fn save(&self, settings: &AppSettings) -> Result<(), ConfigError> {
        let _span = crate::trace_operation_debug!("config.save").entered();
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(settings)?;
        fs::write(&self.config_path, raw)?;
        tracing::debug!(path = %self.config_path.display(), "saved settings");
        Ok(())
    }
}
