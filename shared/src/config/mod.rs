//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token lifetimes, signing key material and session cleanup
//! - `cache` - Revocation index backend and Redis connection settings
//! - `database` - SQLite connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server address and request deadline

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::TokenConfig;
pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Errors reported by [`AppConfig::validate`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingKeyMaterial(Vec<&'static str>),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token configuration
    pub tokens: TokenConfig,

    /// Revocation index configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            tokens: TokenConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Reject configurations that cannot issue tokens.
    ///
    /// Runs before any connection is opened so a misconfigured deployment
    /// fails at startup instead of on the first login.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.tokens.missing_material();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeyMaterial(missing));
        }

        let lifetimes = [
            ("ACCESS_TOKEN_EXPIRES_IN", self.tokens.access_token_expires_in),
            ("REFRESH_TOKEN_EXPIRES_IN", self.tokens.refresh_token_expires_in),
            ("SESSION_TOKEN_EXPIRES_IN", self.tokens.session_token_expires_in),
        ];
        for (name, seconds) in lifetimes {
            if seconds <= 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: format!("lifetime must be positive, got {}", seconds),
                });
            }
        }

        if self.server.request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS",
                reason: "deadline must be at least one second".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> AppConfig {
        AppConfig {
            tokens: TokenConfig {
                access_private_key: "a".into(),
                access_public_key: "b".into(),
                refresh_private_key: "c".into(),
                refresh_public_key: "d".into(),
                session_secret: "e".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert_eq!(complete().validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_missing_key_material() {
        let mut config = complete();
        config.tokens.refresh_public_key.clear();

        match config.validate() {
            Err(ConfigError::MissingKeyMaterial(names)) => {
                assert_eq!(names, vec!["REFRESH_TOKEN_PUBLIC_KEY"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_lifetime() {
        let mut config = complete();
        config.tokens.access_token_expires_in = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name: "ACCESS_TOKEN_EXPIRES_IN", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_deadline() {
        let mut config = complete();
        config.server.request_timeout = 0;

        assert!(config.validate().is_err());
    }
}
