//! Revocation index port.
//!
//! A key-value store with per-key TTL. Presence of `refresh:{jti}` or
//! `access:{jti}` is the only authority for "this token is not revoked".

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainError;

/// One operation inside a batched round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp {
    Set {
        key: String,
        value: String,
        ttl: Duration,
    },
    Delete {
        key: String,
    },
}

impl CacheOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>, ttl: Duration) -> Self {
        CacheOp::Set {
            key: key.into(),
            value: value.into(),
            ttl,
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        CacheOp::Delete { key: key.into() }
    }
}

/// Key-value store backing token revocation
///
/// All failures are reported as `DomainError::Persistence`.
#[async_trait]
pub trait RevocationIndex: Send + Sync {
    /// Read a live value, `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write a value that expires after `ttl`
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Remove a key; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    /// Apply several operations in a single round trip
    ///
    /// The batch is atomic within the index but not across stores.
    async fn exec_batch(&self, ops: &[CacheOp]) -> Result<(), DomainError>;

    /// Write `key` only while `anchor` is still live, atomically
    ///
    /// # Returns
    /// * `Ok(true)` - Anchor present, value written with the new TTL
    /// * `Ok(false)` - Anchor absent, nothing written
    async fn set_while_live(
        &self,
        anchor: &str,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, DomainError>;
}
