//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (defaults apply).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Toast queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Lifetime used when `enqueue` gets none (default: 4000).
    #[serde(default = "default_lifetime_ms")]
    pub default_lifetime_ms: u64,
}

fn default_lifetime_ms() -> u64 {
    4000
}

/// Toast overlay preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Number of toasts drawn at once; the queue itself is unbounded.
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

fn default_max_visible() -> usize {
    5
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => ConfigLoadResult::Loaded(config),
                Err(e) => ConfigLoadResult::Invalid(e),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Parse and validate config text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.max_visible < 1 {
            return Err(ConfigError::Validation("Max visible toasts must be at least 1".to_string()));
        }
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Log level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl NotificationConfig {
    /// Default toast lifetime as a duration.
    pub fn default_lifetime(&self) -> Duration {
        Duration::from_millis(self.default_lifetime_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_lifetime_ms: default_lifetime_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.notifications.default_lifetime(), Duration::from_millis(4000));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.notifications.default_lifetime_ms, 4000);
        assert_eq!(config.ui.max_visible, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::from_toml("[notifications]\ndefault_lifetime_ms = 2500\n").unwrap();
        assert_eq!(config.notifications.default_lifetime(), Duration::from_millis(2500));
        assert_eq!(config.ui.max_visible, 5);
    }

    #[test]
    fn test_validation_max_visible() {
        let mut config = AppConfig::default();
        config.ui.max_visible = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_log_level() {
        let mut config = AppConfig::default();

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "WARN".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[notifications\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_try_load_missing() {
        let path = std::env::temp_dir().join("portal-toast-does-not-exist.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("portal-toast-{}.toml", std::process::id()));
        let mut config = AppConfig::default();
        config.notifications.default_lifetime_ms = 1234;
        config.save(&path).unwrap();

        let loaded = AppConfig::try_load(&path);
        std::fs::remove_file(&path).ok();
        match loaded {
            ConfigLoadResult::Loaded(c) => assert_eq!(c.notifications.default_lifetime_ms, 1234),
            other => panic!("unexpected load result: {other:?}"),
        }
    }
}
