//! Request value objects accepted by the auth facade.

use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub name: String,
    pub password: String,
}

/// Login by exactly one of email or username
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
}

/// Which account lookup a login resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginIdentifier<'a> {
    Email(&'a str),
    Username(&'a str),
}

impl LoginRequest {
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            username: None,
            password: password.into(),
        }
    }

    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: None,
            username: Some(username.into()),
            password: password.into(),
        }
    }

    /// Resolve the identifier; blank strings count as absent.
    ///
    /// Returns `None` when neither or both are supplied.
    pub fn identifier(&self) -> Option<LoginIdentifier<'_>> {
        fn present(value: &Option<String>) -> Option<&str> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
        }

        match (present(&self.email), present(&self.username)) {
            (Some(email), None) => Some(LoginIdentifier::Email(email)),
            (None, Some(username)) => Some(LoginIdentifier::Username(username)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
