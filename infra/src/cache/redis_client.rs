//! Redis cache client implementation
//!
//! A multiplexed Redis connection with retry logic and the handful of
//! commands the revocation index needs: keyed get/set-with-expiry/delete,
//! an atomic multi-key batch, and a guarded set evaluated server-side.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult, Script};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use ta_core::repositories::CacheOp;
use ta_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Sets `KEYS[2]` only while `KEYS[1]` exists, in one server-side step
const SET_WHILE_LIVE_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    redis.call('SET', KEYS[2], ARGV[1], 'PX', ARGV[2])
    return 1
end
return 0
"#;

/// Redis cache client with connection pooling and retry logic
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Maximum number of attempts per operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
    set_while_live: Script,
}

impl RedisClient {
    /// Connect using the retry settings carried by `config`
    ///
    /// # Example
    /// ```no_run
    /// use ta_infra::cache::RedisClient;
    /// use ta_shared::config::CacheConfig;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(
            "Creating Redis client with URL: {} and pool size: {}",
            mask_url(&config.url),
            config.max_connections
        );

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let max_retries = config.max_retries.max(1);
        let connection = Self::create_connection_with_retry(
            client,
            max_retries,
            config.retry_delay_ms,
            Duration::from_secs(config.connection_timeout),
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms: config.retry_delay_ms,
            set_while_live: Script::new(SET_WHILE_LIVE_SCRIPT),
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        connect_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let attempt =
                tokio::time::timeout(connect_timeout, client.get_multiplexed_async_connection())
                    .await
                    .unwrap_or_else(|_| {
                        Err(RedisError::from(std::io::Error::new(
                            std::io::ErrorKind::TimedOut,
                            "connection attempt timed out",
                        )))
                    });

            match attempt {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!(
                        "Failed to connect to Redis after {} attempts: {}",
                        attempts, e
                    );
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set a value that expires after `ttl` (millisecond precision)
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}ms", key, ttl.as_millis());

        let millis = ttl_millis(ttl);
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.pset_ex::<_, _, ()>(key, value, millis).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Get a value; `None` when missing or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to get key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Delete a key; true if something was removed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.del::<_, u32>(key).await })
        })
        .await
        .map(|deleted| deleted > 0)
        .map_err(|e| {
            error!("Failed to delete key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Apply all operations in one MULTI/EXEC transaction
    pub async fn exec_batch(&self, ops: &[CacheOp]) -> Result<(), InfrastructureError> {
        debug!("Executing batch of {} operations", ops.len());

        let mut pipe = redis::pipe();
        pipe.atomic();
        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl } => {
                    pipe.pset_ex(key, value, ttl_millis(*ttl)).ignore();
                }
                CacheOp::Delete { key } => {
                    pipe.del(key).ignore();
                }
            }
        }

        self.execute_with_retry(|mut conn| {
            let pipe = pipe.clone();
            Box::pin(async move { pipe.query_async::<_, ()>(&mut conn).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to execute batch: {}", e);
            InfrastructureError::Cache(e)
        })
    }

    /// Set `key` only while `anchor` exists; false when the anchor is gone
    pub async fn set_while_live(
        &self,
        anchor: &str,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<bool, InfrastructureError> {
        debug!("Setting key '{}' guarded by '{}'", key, anchor);

        let millis = ttl_millis(ttl);
        self.execute_with_retry(|mut conn| {
            let mut invocation = self.set_while_live.prepare_invoke();
            invocation.key(anchor).key(key).arg(value).arg(millis);
            Box::pin(async move { invocation.invoke_async::<_, i64>(&mut conn).await })
        })
        .await
        .map(|applied| applied == 1)
        .map_err(|e| {
            error!("Failed guarded set of '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Remaining time-to-live; `None` if the key is missing or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>, InfrastructureError> {
        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.pttl::<_, i64>(key).await })
        })
        .await
        .map(|millis| u64::try_from(millis).ok().map(Duration::from_millis))
        .map_err(|e| {
            error!("Failed to get TTL for key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check connectivity with PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => Ok(true),
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    async fn execute_with_retry<'a, F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send + 'a>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Redis rejects a zero expiry
fn ttl_millis(ttl: Duration) -> u64 {
    (ttl.as_millis() as u64).max(1)
}

/// Whether a Redis error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
