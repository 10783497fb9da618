//! Domain entities representing core business objects.

pub mod session;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use session::Session;
pub use token::{
    access_key, refresh_key, AccessTokenDetails, Claims, RefreshTokenDetails, SessionClaims,
    SessionTokenDetails, TokenDetails, TokenSet, ACCESS_KEY_PREFIX, REFRESH_KEY_PREFIX,
};
pub use user::{NewUser, User};
