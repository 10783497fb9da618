//! Token lifecycle module
//!
//! This module handles all credential operations:
//! - RS256 / HS256 signing and algorithm-family checked verification
//! - Refresh token issuance with durable session rows
//! - Access token issuance and rotation under a fixed paired identifier
//! - Session (profile snapshot) tokens
//! - Background cleanup of expired session rows

mod access;
mod cleanup;
mod config;
mod id;
mod key_manager;
mod refresh;
mod session;
mod signer;

#[cfg(test)]
pub(crate) mod tests;

pub use access::AccessTokenIssuer;
pub use cleanup::{CleanupResult, SessionCleanupConfig, SessionCleanupService};
pub use config::TokenServiceConfig;
pub use id::{IdGenerator, TimeOrderedIdGenerator};
pub use key_manager::Rs256KeyManager;
pub use refresh::RefreshTokenIssuer;
pub use session::SessionTokenIssuer;
pub use signer::{Hs256Signer, Rs256Signer, TokenSigner};
