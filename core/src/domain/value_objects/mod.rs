//! Value objects representing immutable domain concepts.

pub mod auth_request;
pub mod auth_response;

// Re-export commonly used types
pub use auth_request::{LoginIdentifier, LoginRequest, RegisterRequest};
pub use auth_response::{
    LoginResponse, LogoutResponse, RefreshResponse, RegisterResponse, ValidateResponse,
};
