//! # Token Authority Core
//!
//! Domain layer of the token authority: credential issuance, rotation and
//! revocation for access, refresh and session tokens, plus the auth facade
//! that registers accounts and drives the login lifecycle.
//! Storage and caching are reached only through the repository traits.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AccessTokenDetails, Claims, NewUser, RefreshTokenDetails, Session, SessionClaims,
    SessionTokenDetails, TokenDetails, TokenSet, User,
};
pub use domain::value_objects::{
    LoginIdentifier, LoginRequest, LoginResponse, LogoutResponse, RefreshResponse,
    RegisterRequest, RegisterResponse, ValidateResponse,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{CacheOp, RevocationIndex, SessionRepository, UserRepository};
pub use services::{
    AccessTokenIssuer, AuthService, AuthServiceConfig, Code, PasswordHasher, RefreshTokenIssuer,
    SessionCleanupService, SessionTokenIssuer, Status, TokenServiceConfig,
};
