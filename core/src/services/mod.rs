//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, Code, PasswordHasher, Status};
pub use token::{
    AccessTokenIssuer, RefreshTokenIssuer, SessionCleanupService, SessionTokenIssuer,
    TokenServiceConfig,
};
