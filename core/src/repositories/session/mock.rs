//! Mock implementation of SessionRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

use super::trait_::SessionRepository;

/// Mock session repository for testing
pub struct MockSessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    create_calls: AtomicUsize,
    fail_writes: AtomicBool,
    fail_mark: AtomicBool,
}

impl MockSessionRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            create_calls: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            fail_mark: AtomicBool::new(false),
        }
    }

    /// Make every create fail with a persistence error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make `mark_logged_out` fail with a persistence error
    pub fn set_fail_mark(&self, fail: bool) {
        self.fail_mark.store(fail, Ordering::SeqCst);
    }

    /// Seed a row directly
    pub async fn insert(&self, session: Session) {
        self.sessions.write().await.insert(session.id.clone(), session);
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("mock store unavailable"));
        }

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(DomainError::AlreadyExists {
                resource: format!("session {}", session.id),
            });
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn mark_logged_out(&self, id: &str, at: DateTime<Utc>) -> Result<bool, DomainError> {
        if self.fail_mark.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("mock store unavailable"));
        }

        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) => {
                session.logged_out_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
