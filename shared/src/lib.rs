//! Shared configuration for the Todoapp auth service
//!
//! This crate provides the configuration types used across all server modules.
//! Every sub-config is loaded from environment variables and has a usable
//! `Default` for tests.

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, ConfigError, DatabaseConfig, Environment, LogFormat,
    LoggingConfig, ServerConfig, TokenConfig,
};
