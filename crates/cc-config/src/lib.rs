//! CourseCat Configuration System
//!
//! This crate provides TOML-based configuration with environment variable override support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub mongodb: MongoConfig,
    pub auth: AuthConfig,
    pub marketing: MarketingConfig,
    pub flags: FlagsConfig,

    /// Enable development mode
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            mongodb: MongoConfig::default(),
            auth: AuthConfig::default(),
            marketing: MarketingConfig::default(),
            flags: FlagsConfig::default(),
            dev_mode: false,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["http://localhost:4200".to_string()],
        }
    }
}

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "coursecat".to_string(),
        }
    }
}

/// JWT authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for HS256 token validation
    pub secret_key: String,
    pub issuer: String,
    pub audience: String,
    /// Access token expiration in seconds
    pub token_expiry_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            issuer: "coursecat".to_string(),
            audience: "coursecat".to_string(),
            token_expiry_secs: 3600,
        }
    }
}

/// Marketing site client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketingConfig {
    /// Request timeout for marketing site calls
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for MarketingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "coursecat-catalog".to_string(),
        }
    }
}

/// Feature flag configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlagsConfig {
    /// Switch names enabled at startup
    pub enabled: Vec<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::ValidationError(
                "http.port must be non-zero".to_string(),
            ));
        }
        if self.mongodb.uri.is_empty() {
            return Err(ConfigError::ValidationError(
                "mongodb.uri must not be empty".to_string(),
            ));
        }
        if self.mongodb.database.is_empty() {
            return Err(ConfigError::ValidationError(
                "mongodb.database must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.mongodb.database, "coursecat");
        assert_eq!(config.auth.issuer, "coursecat");
        assert!(config.flags.enabled.is_empty());
        assert!(!config.dev_mode);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            dev_mode = true

            [http]
            port = 9000

            [flags]
            enabled = ["publish_person_to_marketing_site"]
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(config.dev_mode);
        assert_eq!(config.http.port, 9000);
        // Unspecified sections fall back to defaults
        assert_eq!(config.mongodb.uri, "mongodb://localhost:27017");
        assert_eq!(
            config.flags.enabled,
            vec!["publish_person_to_marketing_site".to_string()]
        );
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        let mut config = AppConfig::default();
        config.http.port = 0;
        assert!(config.validate().is_err());
    }
}
