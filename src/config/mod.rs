//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origin, or "*" for any
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Data directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_data_dir() {
        let mut config = AppConfig::default();
        config.data_dir = PathBuf::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matchkeeper.toml");
        std::fs::write(&path, "data_dir = \"/var/lib/matchkeeper\"\n[server]\nport = 9100\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/matchkeeper"));
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "server = [").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.server.cors_origin, parsed.server.cors_origin);
    }
}
