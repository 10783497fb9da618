//! Authentication route handlers
//!
//! This module contains the endpoints under `/api/v1/auth`:
//! - Registration and login
//! - Access token refresh and validation
//! - Logout
//! - The authenticated caller's identity

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod validate;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use register::register;
pub use validate::validate;

use std::sync::Arc;

use ta_core::repositories::{RevocationIndex, SessionRepository, UserRepository};
use ta_core::services::auth::{AuthService, PasswordHasher};

/// Application state shared by the auth handlers
pub struct AppState<U, R, I, H>
where
    U: UserRepository,
    R: SessionRepository,
    I: RevocationIndex,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, R, I, H>>,
}
