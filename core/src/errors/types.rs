//! Error types for credential handling and the auth facade
//!
//! `TokenError` is what the signer and the three issuers return. `AuthError`
//! covers account-level outcomes of the facade. Neither carries internal
//! causes in its display text beyond what is safe to log.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("must provide the username or email")]
    MissingLoginIdentifier,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

/// Token-related errors
///
/// `Revoked` covers logout, TTL eviction and identifiers that never existed;
/// callers cannot tell these apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Unsupported signing algorithm")]
    UnsupportedAlgorithm,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Refresh mapping not found")]
    RefreshNotFound,

    #[error("Key decode failed: {message}")]
    KeyDecode { message: String },

    #[error("Signing failed: {message}")]
    Signing { message: String },
}

impl TokenError {
    /// Whether this is a caller-side credential problem rather than a server fault.
    ///
    /// Every credential problem surfaces as the same unauthenticated outcome.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidSignature
                | TokenError::InvalidClaims
                | TokenError::UnsupportedAlgorithm
                | TokenError::Expired
                | TokenError::Revoked
                | TokenError::RefreshNotFound
        )
    }
}
