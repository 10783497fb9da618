//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Resource already exists: {resource}")]
    AlreadyExists { resource: String },

    /// Store or cache unavailable, or a write that could not be completed
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a persistence failure
    pub fn persistence(message: impl Into<String>) -> Self {
        DomainError::Persistence {
            message: message.into(),
        }
    }

    /// Whether the error means the caller presented a bad or revoked credential
    pub fn is_credential_failure(&self) -> bool {
        match self {
            DomainError::Token(err) => err.is_credential_failure(),
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
