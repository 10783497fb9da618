//! Token entities for JWT-based authentication.
//!
//! All three token kinds share [`Claims`]; the session token adds a profile
//! snapshot on top. Signing method, key material and lifetime are decided by
//! the issuer, not by the claim set.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cache key prefix for refresh mappings (`refresh:{jti}` → paired access jti)
pub const REFRESH_KEY_PREFIX: &str = "refresh:";

/// Cache key prefix for access mappings (`access:{jti}` → user id)
pub const ACCESS_KEY_PREFIX: &str = "access:";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (numeric user ID)
    pub sub: i64,

    /// JWT ID, the revocation key
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp, always equal to `iat`
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims issued at `now` that expire after `lifetime`
    ///
    /// # Arguments
    ///
    /// * `user_id` - The subject
    /// * `jti` - Token identifier
    /// * `now` - Issuance instant
    /// * `lifetime` - Validity window
    pub fn new(user_id: i64, jti: impl Into<String>, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: user_id,
            jti: jti.into(),
            iat,
            nbf: iat,
            exp: (now + lifetime).timestamp(),
        }
    }
}

/// Session token claims: base claims plus a client-readable profile snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub base: Claims,
    pub email: String,
    pub username: String,
    pub name: String,
}

/// Signed token string together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDetails {
    pub token: String,
    pub jti: String,
    pub user_id: i64,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl TokenDetails {
    pub(crate) fn from_claims(token: String, claims: &Claims) -> Self {
        Self {
            token,
            jti: claims.jti.clone(),
            user_id: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

/// Refresh token plus the access identifier paired with it at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenDetails {
    pub details: TokenDetails,
    pub access_jti: String,
}

/// Access token details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenDetails {
    pub details: TokenDetails,
}

/// Session token details with the profile snapshot it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokenDetails {
    pub details: TokenDetails,
    pub email: String,
    pub username: String,
    pub name: String,
}

/// The three signed tokens returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access: String,
    pub refresh: String,
    pub session: String,
}

/// Revocation index key for a refresh token identifier
pub fn refresh_key(jti: &str) -> String {
    format!("{}{}", REFRESH_KEY_PREFIX, jti)
}

/// Revocation index key for an access token identifier
pub fn access_key(jti: &str) -> String {
    format!("{}{}", ACCESS_KEY_PREFIX, jti)
}
