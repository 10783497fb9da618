//! # Infrastructure Layer
//!
//! Concrete collaborators for the token authority core:
//!
//! - **Database**: SQLite session and account stores using SQLx, plus schema migrations
//! - **Cache**: Redis-backed revocation index with retry logic, and an
//!   in-process index for single-node deployments and tests
//! - **Security**: bcrypt password hashing
//!
//! ## Features
//!
//! - `sqlite`: Enable SQLite database support (default)
//! - `redis-cache`: Enable the Redis revocation index (default)

use ta_core::errors::DomainError;

/// Database module - SQLite implementations using SQLx
#[cfg(feature = "sqlite")]
pub mod database;

/// Cache module - revocation index backends
pub mod cache;

/// Security module - password hashing
pub mod security;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::persistence(err.to_string())
    }
}
