//! Configuration management for the UserDB API
//!
//! This module provides a centralized configuration system that loads settings from:
//! 1. Environment variables (highest priority)
//! 2. Configuration file (TOML format)
//! 3. Default values (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Main configuration struct for the UserDB API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Kubernetes configuration
    pub kubernetes: KubernetesConfig,
    /// Provisioned database configuration
    pub database: DatabaseConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

/// Kubernetes configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KubernetesConfig {
    /// Namespace that receives the per-user database resources
    pub namespace: String,
}

/// Configuration of the per-user database workloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Container image for the database
    pub image: String,
    /// Port the database listens on inside the pod
    pub port: i32,
    /// Superuser password injected into each database container.
    ///
    /// Must be supplied via configuration or `USERDB_DATABASE_PASSWORD`;
    /// there is deliberately no default.
    pub password: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for log files; console-only when unset
    pub log_dir: Option<PathBuf>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(PathBuf, String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            kubernetes: KubernetesConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            image: "postgres:13".to_string(),
            port: 5432,
            password: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file
    pub fn load() -> Self {
        let mut config = Self::default();

        // Try to load from config file first
        if let Some(config_path) = Self::find_config_file() {
            if let Ok(file_config) = Self::load_from_file(&config_path) {
                config = file_config;
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        config
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.clone(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            // Environment variable override
            std::env::var("USERDB_CONFIG").ok().map(PathBuf::from),
            // Standard locations
            Some(PathBuf::from("/etc/userdb/config.toml")),
            Some(PathBuf::from("./config.toml")),
            Some(PathBuf::from("./userdb.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Server
        if let Ok(host) = std::env::var("USERDB_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("USERDB_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        // Kubernetes
        if let Ok(namespace) = std::env::var("USERDB_NAMESPACE") {
            self.kubernetes.namespace = namespace;
        }

        // Database
        if let Ok(image) = std::env::var("USERDB_DATABASE_IMAGE") {
            self.database.image = image;
        }
        if let Ok(port) = std::env::var("USERDB_DATABASE_PORT") {
            if let Ok(port) = port.parse() {
                self.database.port = port;
            }
        }
        if let Ok(password) = std::env::var("USERDB_DATABASE_PASSWORD") {
            self.database.password = Some(password);
        }

        // Logging
        if let Ok(level) = std::env::var("USERDB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(dir) = std::env::var("USERDB_LOG_DIR") {
            self.logging.log_dir = Some(PathBuf::from(dir));
        }
    }

    /// Validate the configuration before the server starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kubernetes.namespace.is_empty() {
            return Err(ConfigError::Invalid(
                "kubernetes.namespace must not be empty".to_string(),
            ));
        }
        if self.database.image.is_empty() {
            return Err(ConfigError::Invalid(
                "database.image must not be empty".to_string(),
            ));
        }
        if self.database.port <= 0 || self.database.port > 65535 {
            return Err(ConfigError::Invalid(format!(
                "database.port {} is out of range",
                self.database.port
            )));
        }
        match &self.database.password {
            Some(p) if !p.is_empty() => Ok(()),
            _ => Err(ConfigError::Invalid(
                "database.password is not set; supply it via configuration or \
                 the USERDB_DATABASE_PASSWORD environment variable"
                    .to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.kubernetes.namespace, "default");
        assert_eq!(config.database.image, "postgres:13");
        assert_eq!(config.database.port, 5432);
        assert!(config.database.password.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [kubernetes]
            namespace = "tenants"

            [database]
            image = "postgres:16"
            port = 5433
            password = "s3cret"

            [logging]
            level = "debug"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.kubernetes.namespace, "tenants");
        assert_eq!(config.database.image, "postgres:16");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.database.password.as_deref(), Some("s3cret"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.log_dir.is_none());
    }

    // Single test for the environment layer: cargo runs tests in parallel
    // threads and these variables are process-wide.
    #[test]
    fn test_env_overrides_take_precedence() {
        std::env::set_var("USERDB_NAMESPACE", "tenants");
        std::env::set_var("USERDB_DATABASE_PASSWORD", "from-env");
        std::env::set_var("USERDB_DATABASE_PORT", "5433");

        let config = AppConfig::load();

        assert_eq!(config.kubernetes.namespace, "tenants");
        assert_eq!(config.database.password.as_deref(), Some("from-env"));
        assert_eq!(config.database.port, 5433);
        // Untouched settings keep their defaults
        assert_eq!(config.database.image, "postgres:13");

        // An unparseable port is ignored, keeping the previous value
        std::env::set_var("USERDB_DATABASE_PORT", "not-a-port");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.database.port, 5432);

        std::env::remove_var("USERDB_NAMESPACE");
        std::env::remove_var("USERDB_DATABASE_PASSWORD");
        std::env::remove_var("USERDB_DATABASE_PORT");
    }

    #[test]
    fn test_validate_requires_password() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_err());

        config.database.password = Some(String::new());
        assert!(config.validate().is_err());

        config.database.password = Some("s3cret".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_port() {
        let mut config = AppConfig::default();
        config.database.password = Some("s3cret".to_string());
        config.database.port = 0;
        assert!(config.validate().is_err());

        config.database.port = 70000;
        assert!(config.validate().is_err());
    }
}
