//! Configuration for the token issuers

use chrono::Duration;
use ta_shared::TokenConfig;

/// Lifetimes shared by the three issuers
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime, also the TTL of `access:{jti}`
    pub access_lifetime: Duration,
    /// Refresh token lifetime, also the TTL of `refresh:{jti}`
    pub refresh_lifetime: Duration,
    /// Session token lifetime
    pub session_lifetime: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_lifetime: Duration::minutes(15),
            refresh_lifetime: Duration::days(30),
            session_lifetime: Duration::days(30),
        }
    }
}

impl TokenServiceConfig {
    /// Build from the environment-level token configuration
    pub fn from_token_config(config: &TokenConfig) -> Self {
        Self {
            access_lifetime: Duration::seconds(config.access_token_expires_in),
            refresh_lifetime: Duration::seconds(config.refresh_token_expires_in),
            session_lifetime: Duration::seconds(config.session_token_expires_in),
        }
    }

    /// Cache TTL for the access mapping
    pub fn access_ttl(&self) -> std::time::Duration {
        to_ttl(self.access_lifetime)
    }

    /// Cache TTL for the refresh mapping
    pub fn refresh_ttl(&self) -> std::time::Duration {
        to_ttl(self.refresh_lifetime)
    }
}

/// Negative lifetimes clamp to zero; `AppConfig::validate` rejects them upstream.
fn to_ttl(lifetime: Duration) -> std::time::Duration {
    lifetime.to_std().unwrap_or_default()
}
