//! Token lifetimes and signing key material

use serde::{Deserialize, Serialize};

/// Token issuance configuration.
///
/// RSA keys are carried base64-encoded, exactly as they arrive from the
/// environment; decoding happens once when the key managers are built.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Access token lifetime in seconds
    pub access_token_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expires_in: i64,

    /// Session token lifetime in seconds
    pub session_token_expires_in: i64,

    /// Base64-encoded PEM private key for access tokens
    pub access_private_key: String,

    /// Base64-encoded PEM public key for access tokens
    pub access_public_key: String,

    /// Base64-encoded PEM private key for refresh tokens
    pub refresh_private_key: String,

    /// Base64-encoded PEM public key for refresh tokens
    pub refresh_public_key: String,

    /// HMAC secret for session tokens
    pub session_secret: String,

    /// Interval between expired-session sweeps in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,

    /// Whether the expired-session sweep runs at all
    #[serde(default = "default_cleanup_enabled")]
    pub cleanup_enabled: bool,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_token_expires_in", &self.access_token_expires_in)
            .field("refresh_token_expires_in", &self.refresh_token_expires_in)
            .field("session_token_expires_in", &self.session_token_expires_in)
            .field("access_private_key", &"[REDACTED]")
            .field("access_public_key", &"[REDACTED]")
            .field("refresh_private_key", &"[REDACTED]")
            .field("refresh_public_key", &"[REDACTED]")
            .field("session_secret", &"[REDACTED]")
            .field("cleanup_interval", &self.cleanup_interval)
            .field("cleanup_enabled", &self.cleanup_enabled)
            .finish()
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_expires_in: 900,       // 15 minutes
            refresh_token_expires_in: 2_592_000, // 30 days
            session_token_expires_in: 2_592_000,
            access_private_key: String::new(),
            access_public_key: String::new(),
            refresh_private_key: String::new(),
            refresh_public_key: String::new(),
            session_secret: String::new(),
            cleanup_interval: default_cleanup_interval(),
            cleanup_enabled: default_cleanup_enabled(),
        }
    }
}

impl TokenConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let seconds = |name: &str, fallback: i64| -> i64 {
            std::env::var(name)
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(fallback)
        };
        let text = |name: &str| std::env::var(name).unwrap_or_default();

        let refresh_token_expires_in =
            seconds("REFRESH_TOKEN_EXPIRES_IN", defaults.refresh_token_expires_in);

        Self {
            access_token_expires_in: seconds(
                "ACCESS_TOKEN_EXPIRES_IN",
                defaults.access_token_expires_in,
            ),
            refresh_token_expires_in,
            // Session tokens live as long as the refresh token unless told otherwise
            session_token_expires_in: seconds("SESSION_TOKEN_EXPIRES_IN", refresh_token_expires_in),
            access_private_key: text("ACCESS_TOKEN_PRIVATE_KEY"),
            access_public_key: text("ACCESS_TOKEN_PUBLIC_KEY"),
            refresh_private_key: text("REFRESH_TOKEN_PRIVATE_KEY"),
            refresh_public_key: text("REFRESH_TOKEN_PUBLIC_KEY"),
            session_secret: text("SESSION_SECRET"),
            cleanup_interval: std::env::var("SESSION_CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
            cleanup_enabled: std::env::var("SESSION_CLEANUP_ENABLED")
                .map(|value| value != "false" && value != "0")
                .unwrap_or(defaults.cleanup_enabled),
        }
    }

    /// Names of the key-material variables that are still empty
    pub fn missing_material(&self) -> Vec<&'static str> {
        [
            ("ACCESS_TOKEN_PRIVATE_KEY", &self.access_private_key),
            ("ACCESS_TOKEN_PUBLIC_KEY", &self.access_public_key),
            ("REFRESH_TOKEN_PRIVATE_KEY", &self.refresh_private_key),
            ("REFRESH_TOKEN_PUBLIC_KEY", &self.refresh_public_key),
            ("SESSION_SECRET", &self.session_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

fn default_cleanup_interval() -> u64 {
    3600
}

fn default_cleanup_enabled() -> bool {
    true
}
