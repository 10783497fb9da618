//! Cache module for the revocation index
//!
//! Provides the Redis client with retry logic, the Redis-backed revocation
//! index, and an in-process alternative selected by `CACHE_BACKEND`.

pub mod memory;
pub mod redis_client;
pub mod revocation_index;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use ta_core::errors::DomainError;
use ta_core::repositories::{CacheOp, RevocationIndex};

pub use memory::MemoryRevocationIndex;
pub use redis_client::RedisClient;
pub use revocation_index::RedisRevocationIndex;

// Re-export commonly used types
pub use ta_shared::config::{CacheBackend, CacheConfig};

use crate::InfrastructureError;

/// Revocation index backend chosen at startup
pub enum RevocationStore {
    Redis(RedisRevocationIndex),
    Memory(MemoryRevocationIndex),
}

impl RevocationStore {
    /// Build the backend named by `config.backend`
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        match config.backend {
            CacheBackend::Redis => {
                let client = RedisClient::new(config.clone()).await?;
                Ok(RevocationStore::Redis(RedisRevocationIndex::new(client)))
            }
            CacheBackend::Memory => {
                info!("Using in-process revocation index");
                Ok(RevocationStore::Memory(MemoryRevocationIndex::new()))
            }
        }
    }

    /// Whether the backend is reachable
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        match self {
            RevocationStore::Redis(index) => index.client().health_check().await,
            RevocationStore::Memory(_) => Ok(true),
        }
    }
}

#[async_trait]
impl RevocationIndex for RevocationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        match self {
            RevocationStore::Redis(index) => index.get(key).await,
            RevocationStore::Memory(index) => index.get(key).await,
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        match self {
            RevocationStore::Redis(index) => index.set_with_ttl(key, value, ttl).await,
            RevocationStore::Memory(index) => index.set_with_ttl(key, value, ttl).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        match self {
            RevocationStore::Redis(index) => index.delete(key).await,
            RevocationStore::Memory(index) => index.delete(key).await,
        }
    }

    async fn exec_batch(&self, ops: &[CacheOp]) -> Result<(), DomainError> {
        match self {
            RevocationStore::Redis(index) => index.exec_batch(ops).await,
            RevocationStore::Memory(index) => index.exec_batch(ops).await,
        }
    }

    async fn set_while_live(
        &self,
        anchor: &str,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, DomainError> {
        match self {
            RevocationStore::Redis(index) => index.set_while_live(anchor, key, value, ttl).await,
            RevocationStore::Memory(index) => index.set_while_live(anchor, key, value, ttl).await,
        }
    }
}
