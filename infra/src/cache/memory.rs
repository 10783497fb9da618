//! In-process revocation index
//!
//! Holds every entry in one map behind a single lock, which makes batches
//! and the guarded set atomic for free. Only suitable when one process owns
//! all sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use ta_core::errors::DomainError;
use ta_core::repositories::{CacheOp, RevocationIndex};

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

#[derive(Default)]
pub struct MemoryRevocationIndex {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryRevocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unexpired entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn prune(entries: &mut HashMap<String, Entry>) {
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        if entries.len() < before {
            debug!("Pruned {} expired index entries", before - entries.len());
        }
    }
}

#[async_trait]
impl RevocationIndex for MemoryRevocationIndex {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        Self::prune(&mut entries);
        entries.insert(key.to_string(), Entry::new(value, ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn exec_batch(&self, ops: &[CacheOp]) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        Self::prune(&mut entries);
        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl } => {
                    entries.insert(key.clone(), Entry::new(value, *ttl));
                }
                CacheOp::Delete { key } => {
                    entries.remove(key);
                }
            }
        }
        Ok(())
    }

    async fn set_while_live(
        &self,
        anchor: &str,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        if !entries.get(anchor).is_some_and(|entry| entry.is_live(now)) {
            return Ok(false);
        }
        entries.insert(key.to_string(), Entry::new(value, ttl));
        Ok(true)
    }
}
