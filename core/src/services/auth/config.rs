//! Configuration for the authentication service

use std::time::Duration;

use ta_shared::config::ServerConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Upper bound on each facade operation, storage and cache round-trips included
    pub request_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl AuthServiceConfig {
    pub fn from_server_config(server: &ServerConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(server.request_timeout),
        }
    }
}
