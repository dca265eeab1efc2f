//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "coursecat.toml",
    "./config/config.toml",
    "./config/coursecat.toml",
    "/etc/coursecat/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        // Start with defaults
        let mut config = AppConfig::default();

        // Try to load from file
        if let Some(path) = self.find_config_file() {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        // Apply environment variable overrides
        self.apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(&self) -> Option<PathBuf> {
        // Check explicit path first
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
        }

        // Check COURSECAT_CONFIG env var
        if let Ok(path) = env::var("COURSECAT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // Search standard paths
        for path in CONFIG_PATHS {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, config: &mut AppConfig) {
        // HTTP
        if let Ok(val) = env::var("COURSECAT_HTTP_PORT") {
            if let Ok(port) = val.parse() {
                config.http.port = port;
            }
        }
        if let Ok(val) = env::var("COURSECAT_HTTP_HOST") {
            config.http.host = val;
        }
        if let Ok(val) = env::var("COURSECAT_CORS_ORIGINS") {
            config.http.cors_origins = val.split(',').map(|s| s.trim().to_string()).collect();
        }

        // MongoDB
        if let Ok(val) = env::var("COURSECAT_MONGODB_URI") {
            config.mongodb.uri = val;
        }
        if let Ok(val) = env::var("COURSECAT_MONGODB_DATABASE") {
            config.mongodb.database = val;
        }

        // Auth
        if let Ok(val) = env::var("COURSECAT_AUTH_SECRET_KEY") {
            config.auth.secret_key = val;
        }
        if let Ok(val) = env::var("COURSECAT_JWT_ISSUER") {
            config.auth.issuer = val;
        }
        if let Ok(val) = env::var("COURSECAT_JWT_AUDIENCE") {
            config.auth.audience = val;
        }
        if let Ok(val) = env::var("COURSECAT_TOKEN_EXPIRY_SECS") {
            if let Ok(secs) = val.parse() {
                config.auth.token_expiry_secs = secs;
            }
        }

        // Marketing site client
        if let Ok(val) = env::var("COURSECAT_MARKETING_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.marketing.timeout_secs = secs;
            }
        }
        if let Ok(val) = env::var("COURSECAT_MARKETING_USER_AGENT") {
            config.marketing.user_agent = val;
        }

        // Feature flags
        if let Ok(val) = env::var("COURSECAT_FLAGS_ENABLED") {
            config.flags.enabled = val.split(',').map(|s| s.trim().to_string()).collect();
        }

        // General
        if let Ok(val) = env::var("COURSECAT_DEV_MODE") {
            config.dev_mode = val.parse().unwrap_or(false);
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
