//! Redis-backed revocation index

use async_trait::async_trait;
use std::time::Duration;

use ta_core::errors::DomainError;
use ta_core::repositories::{CacheOp, RevocationIndex};

use super::redis_client::RedisClient;

/// Revocation index stored in Redis
///
/// Batches run as a single MULTI/EXEC and the guarded set runs as a Lua
/// script, so concurrent rotation and logout see each other atomically.
#[derive(Clone)]
pub struct RedisRevocationIndex {
    client: RedisClient,
}

impl RedisRevocationIndex {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl RevocationIndex for RedisRevocationIndex {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(key).await?)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        Ok(self.client.set_with_expiry(key, value, ttl).await?)
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.client.delete(key).await?;
        Ok(())
    }

    async fn exec_batch(&self, ops: &[CacheOp]) -> Result<(), DomainError> {
        if ops.is_empty() {
            return Ok(());
        }
        Ok(self.client.exec_batch(ops).await?)
    }

    async fn set_while_live(
        &self,
        anchor: &str,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, DomainError> {
        Ok(self.client.set_while_live(anchor, key, value, ttl).await?)
    }
}
