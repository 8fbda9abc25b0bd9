//! Application configuration persistence
//!
//! Stores user preferences in `~/.config/partsheet/config.yaml`

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Company details prefilled into every session's metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDefaults {
    pub name: String,
    pub address: String,
    pub contact: String,
}

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub company: CompanyDefaults,
    /// Empty rows in a fresh grid
    #[serde(default = "default_initial_rows")]
    pub initial_rows: usize,
    /// Prefix for prices on documents
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Shown for empty document fields
    #[serde(default = "default_blank_placeholder")]
    pub blank_placeholder: String,
}

fn default_initial_rows() -> usize {
    1
}

fn default_currency_symbol() -> String {
    "¥".to_string()
}

fn default_blank_placeholder() -> String {
    "_____".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            company: CompanyDefaults::default(),
            initial_rows: default_initial_rows(),
            currency_symbol: default_currency_symbol(),
            blank_placeholder: default_blank_placeholder(),
        }
    }
}

/// Error reading or writing a config file
#[derive(Debug)]
pub enum ConfigError {
    /// Neither XDG_CONFIG_HOME nor a home directory is available
    NoConfigDir,
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_yaml::Error },
    Serialize(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "no config directory available"),
            ConfigError::Io { path, source } => {
                write!(f, "failed to access {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config at {}: {}", path.display(), source)
            }
            ConfigError::Serialize(e) => write!(f, "failed to serialize config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if missing or invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty file is a config with every default
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the user config file
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to an explicit file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.initial_rows, 1);
        assert_eq!(config.currency_symbol, "¥");
        assert_eq!(config.blank_placeholder, "_____");
        assert_eq!(config.company, CompanyDefaults::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: AppConfig = serde_yaml::from_str("company:\n  name: 精工机械\ninitial_rows: 5\n").unwrap();
        assert_eq!(config.company.name, "精工机械");
        assert_eq!(config.company.address, "");
        assert_eq!(config.initial_rows, 5);
        assert_eq!(config.currency_symbol, "¥");
    }
}
