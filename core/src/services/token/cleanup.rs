//! Session cleanup service for periodic removal of expired session rows
//!
//! A login whose cache write never landed leaves a row nobody can use.
//! Such rows, and every row past its refresh token's `exp`, are swept here.

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::SessionRepository;

/// Configuration for session cleanup service
#[derive(Debug, Clone)]
pub struct SessionCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for SessionCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service for cleaning up expired session rows
pub struct SessionCleanupService<R: SessionRepository + 'static> {
    repository: Arc<R>,
    config: SessionCleanupConfig,
}

impl<R: SessionRepository> SessionCleanupService<R> {
    /// Create a new session cleanup service
    pub fn new(repository: Arc<R>, config: SessionCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of cleanup operations
    /// * `Err(DomainError)` - If the store could not be reached
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let expired_sessions_deleted = self.repository.delete_expired(Utc::now()).await?;
        info!("Deleted {} expired sessions", expired_sessions_deleted);

        Ok(CleanupResult {
            expired_sessions_deleted,
        })
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Session cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        tokio::spawn(async move {
            info!(
                "Session cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("Session cleanup cycle failed: {}", e);
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired session rows deleted
    pub expired_sessions_deleted: u64,
}
