//! Response value objects for the auth facade operations.

use serde::{Deserialize, Serialize};

use crate::domain::entities::TokenSet;

/// Outcome of `Register`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// Outcome of `Login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token_set: TokenSet,
}

/// Outcome of `Refresh`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
}

/// Outcome of `Logout`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Outcome of `Validate`
///
/// `user_id` is the decimal rendering of the token subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateResponse {
    pub success: bool,
    pub is_valid: bool,
    pub user_id: String,
}

impl RegisterResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl LogoutResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl ValidateResponse {
    pub fn valid(user_id: i64) -> Self {
        Self {
            success: true,
            is_valid: true,
            user_id: user_id.to_string(),
        }
    }
}
