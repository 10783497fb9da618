//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned numeric identifier, used as the token subject
    pub id: i64,

    pub email: String,

    pub username: String,

    /// Display name
    pub name: String,

    /// One-way password hash; never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("name", &self.name)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Account data accepted by the account store; the store assigns the id
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            name: name.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Materialize the account once the store has assigned an id
    pub fn into_user(self, id: i64, created_at: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            username: self.username,
            name: self.name,
            password_hash: self.password_hash,
            created_at,
        }
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
