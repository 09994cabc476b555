//! Application configuration
//!
//! Loaded from a TOML file, by default `<config dir>/delivery-fee/config.toml`
//! (override the path with `DELIVERY_FEE_CONFIG`). Every key is optional:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! shutdown_timeout = 30
//!
//! [database]
//! url = "sqlite://./delivery_fee.db?mode=rwc"
//!
//! [weather]
//! feed_url = "https://www.ilmateenistus.ee/ilma_andmed/xml/observations.php"
//! fetch_minute = 15
//! fetch_on_startup = true
//! request_timeout_secs = 10
//! retry_attempts = 3
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "DELIVERY_FEE_CONFIG";
const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub weather: WeatherConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight work on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./delivery_fee.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSection {
    /// Connection URL, `DATABASE_URL` taking precedence over the file.
    pub fn connection_url(&self) -> String {
        std::env::var(DATABASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.url.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub feed_url: String,
    /// Minute past every hour (UTC) at which the feed is fetched
    pub fetch_minute: u32,
    pub fetch_on_startup: bool,
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://www.ilmateenistus.ee/ilma_andmed/xml/observations.php".to_string(),
            fetch_minute: 15,
            fetch_on_startup: true,
            request_timeout_secs: 10,
            retry_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// `DELIVERY_FEE_CONFIG`, else `delivery-fee/config.toml` in the user config dir.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("delivery-fee")
        .join("config.toml")
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weather.fetch_minute > 59 {
            return Err(ConfigError::Invalid(format!(
                "weather.fetch_minute must be 0..=59, got {}",
                self.weather.fetch_minute
            )));
        }
        if self.weather.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "weather.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.weather.feed_url.trim().is_empty() {
            return Err(ConfigError::Invalid("weather.feed_url is empty".to_string()));
        }
        Ok(())
    }

    /// Write as pretty TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.shutdown_timeout, 30);
        assert_eq!(config.weather.fetch_minute, 15);
        assert!(config.weather.fetch_on_startup);
        assert_eq!(config.weather.retry_attempts, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [weather]
            fetch_minute = 5
            fetch_on_startup = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.weather.fetch_minute, 5);
        assert!(!config.weather.fetch_on_startup);
        assert_eq!(config.weather.request_timeout_secs, 10);
        assert_eq!(config.server.address(), "0.0.0.0:9090");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            AppConfig::from_toml("[weather]\nfetch_minute = 60"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[server]\nport = \"eighty\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn save_and_load() {
        let dir = std::env::temp_dir().join(format!("delivery-fee-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.server.port = 8181;
        config.weather.retry_attempts = 5;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.server.port, 8181);
        assert_eq!(loaded.weather.retry_attempts, 5);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("delivery-fee-does-not-exist.toml");
        assert_eq!(AppConfig::load(&path).unwrap().server.port, 8080);
    }
}
