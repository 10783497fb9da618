//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: AtomicUsize,
    lookups: AtomicUsize,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicUsize::new(1),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Insert an account with a fixed id
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Number of find calls served
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(DomainError::AlreadyExists {
                resource: "user".to_string(),
            });
        }

        let id = loop {
            let candidate = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
            if !users.contains_key(&candidate) {
                break candidate;
            }
        };
        let created = user.into_user(id, Utc::now());
        users.insert(id, created.clone());
        Ok(created)
    }
}
