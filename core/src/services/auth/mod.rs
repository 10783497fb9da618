//! Authentication service module
//!
//! This module provides the facade callers talk to:
//! - Account registration
//! - Login by email or username, issuing access, refresh and session tokens
//! - Access token rotation from a refresh token
//! - Logout and access token validation

mod config;
mod password;
mod service;
mod status;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::PasswordHasher;
pub use service::AuthService;
pub use status::{Code, Status};
