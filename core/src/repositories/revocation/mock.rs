//! Mock implementation of RevocationIndex for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::DomainError;

use super::trait_::{CacheOp, RevocationIndex};

/// In-memory revocation index with TTL tracking and failure injection.
///
/// Expiry follows `tokio::time`, so paused-clock tests can advance past a TTL.
pub struct MockRevocationIndex {
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MockRevocationIndex {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            writes: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of mutating calls (batches count once)
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Remaining TTL of a live key
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|(_, deadline)| *deadline > now)
            .map(|(_, deadline)| *deadline - now)
    }

    /// Drop a key as if its TTL had elapsed
    pub async fn evict(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    pub async fn live_keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|(_, (_, deadline))| *deadline > now)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    fn check_write(&self) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("mock cache unavailable"));
        }
        Ok(())
    }
}

impl Default for MockRevocationIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationIndex for MockRevocationIndex {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("mock cache unavailable"));
        }
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|(_, deadline)| *deadline > now)
            .map(|(value, _)| value.clone()))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        self.check_write()?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.check_write()?;
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn exec_batch(&self, ops: &[CacheOp]) -> Result<(), DomainError> {
        self.check_write()?;
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl } => {
                    entries.insert(key.clone(), (value.clone(), now + *ttl));
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
        self.check_write()?;
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let anchor_live = entries
            .get(anchor)
            .map(|(_, deadline)| *deadline > now)
            .unwrap_or(false);
        if !anchor_live {
            return Ok(false);
        }
        entries.insert(key.to_string(), (value.to_string(), now + ttl));
        Ok(true)
    }
}
