//! Durable session record, one per login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session row keyed by the refresh token's `jti`.
///
/// Rows are never reused across logins. Logout stamps `logged_out_at` for the
/// audit trail; liveness itself is decided by the revocation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Equals the refresh token identifier
    pub id: String,

    pub user_id: i64,

    pub login_at: DateTime<Utc>,

    /// Unix seconds, same value as the refresh token's `exp`
    pub expires_at: i64,

    pub logged_out_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: impl Into<String>, user_id: i64, login_at: DateTime<Utc>, expires_at: i64) -> Self {
        Self {
            id: id.into(),
            user_id,
            login_at,
            expires_at,
            logged_out_at: None,
        }
    }

    /// Whether the row has outlived its refresh token
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}
