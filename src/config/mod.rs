//! Configuration for the shared library
//!
//! Settings are persisted as TOML under the platform configuration
//! directory. Every section carries defaults, so a missing or partial
//! file always loads cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::DEFAULT_CACHE_MAX_AGE_SECS;
use crate::error::{SharedError, SharedResult};

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SharedConfig {
    /// Logging settings
    pub logging: LoggingSettings,

    /// File-read cache settings
    pub cache: CacheSettings,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level name ("error", "warn", "info", "debug", "trace")
    pub level: String,

    /// Whether debug logging is enabled regardless of level
    pub debug: bool,
}

/// Settings for the age-based file-read cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheSettings {
    /// Whether cached reads are enabled
    pub enabled: bool,

    /// Maximum age of a cached read in seconds
    pub max_age_secs: u64,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            debug: false,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS as u64,
        }
    }
}

impl SharedConfig {
    /// Load configuration from a TOML file
    ///
    /// A missing file yields the defaults rather than an error.
    pub fn load_from(path: impl AsRef<Path>) -> SharedResult<SharedConfig> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Ok(SharedConfig::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SharedError::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Save configuration as TOML, creating parent directories as needed
    pub fn save_to(&self, path: impl AsRef<Path>) -> SharedResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| SharedError::Config {
            message: format!("failed to serialize configuration: {e}"),
        })?;
        fs::write(path, content)?;
        debug!("configuration saved to {}", path.display());
        Ok(())
    }
}

/// Default location of the configuration file
///
/// Resolves under the platform configuration directory, falling back to
/// the current directory when none is available.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("datakit")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SharedConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.debug);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.max_age_secs, 900);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SharedConfig::load_from(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, SharedConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = SharedConfig::default();
        config.cache.enabled = true;
        config.cache.max_age_secs = 60;
        config.logging.debug = true;
        config.save_to(&path).unwrap();

        let reloaded = SharedConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[cache]\nenabled = true\n").unwrap();

        let config = SharedConfig::load_from(&path).unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.max_age_secs, 900);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not valid toml [[[").unwrap();

        assert!(matches!(
            SharedConfig::load_from(&path),
            Err(SharedError::Config { .. })
        ));
    }

    #[test]
    fn test_default_config_path_shape() {
        let path = default_config_path();
        assert!(path.ends_with("datakit/config.toml"));
    }
}
