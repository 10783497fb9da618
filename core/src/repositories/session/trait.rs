//! Session repository trait defining the durable session store interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::session::Session;
use crate::errors::DomainError;

/// Repository trait for Session persistence operations
///
/// Primary-key uniqueness on `id` is the only integrity constraint the
/// token engine relies on. Implementations must report a duplicate id as
/// `DomainError::AlreadyExists` so the caller can regenerate identifiers.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session row
    ///
    /// # Returns
    /// * `Ok(())` - Row written
    /// * `Err(DomainError::AlreadyExists)` - A row with this id already exists
    /// * `Err(DomainError::Persistence)` - Store unavailable
    async fn create(&self, session: &Session) -> Result<(), DomainError>;

    /// Find a session by its id (the refresh token `jti`)
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError>;

    /// Delete a session row
    ///
    /// # Returns
    /// * `Ok(true)` - Row removed
    /// * `Ok(false)` - No such row
    async fn delete_by_id(&self, id: &str) -> Result<bool, DomainError>;

    /// Record that the session was ended by logout
    ///
    /// # Returns
    /// * `Ok(true)` - Row stamped
    /// * `Ok(false)` - No such row
    async fn mark_logged_out(&self, id: &str, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Remove rows whose `expires_at` is at or before `now`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of rows removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
