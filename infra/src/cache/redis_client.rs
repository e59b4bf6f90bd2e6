//! Redis cache client implementation
//!
//! Provides a Redis client over one multiplexed connection with bounded
//! retries and the key operations the session store needs: set with expiry,
//! get, delete, TTL lookup and a PING health check.

use async_trait::async_trait;
use redis::{
    aio::MultiplexedConnection, AsyncCommands, Client, ErrorKind, IntoConnectionInfo, RedisError,
    RedisResult,
};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tg_shared::config::CacheConfig;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use super::client::CacheClient;
use crate::InfrastructureError;

/// Upper bound for the exponential backoff between attempts
const MAX_RETRY_DELAY_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with retry logic
///
/// Cloning is cheap: clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings, including retry policy
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    ///
    /// # Example
    /// ```no_run
    /// use tg_infra::cache::RedisClient;
    /// use tg_shared::config::CacheConfig;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_prefix("tokengate");
    ///     let client = RedisClient::new(config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(
            url = %mask_url(&config.url),
            database = config.database,
            "Creating Redis client"
        );

        let mut connection_info = config.url.as_str().into_connection_info().map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;
        if config.database != 0 {
            connection_info.redis.db = i64::from(config.database);
        }

        let client = Client::open(connection_info)
            .map_err(|e| InfrastructureError::Config(format!("Invalid Redis URL: {}", e)))?;

        let connection = Self::create_connection_with_retry(&client, &config).await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let max_attempts = config.max_retries.max(1);
        let connect_timeout = Duration::from_secs(config.connection_timeout);
        let mut attempts = 0;
        let mut delay = config.retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result,
                Err(_) => Err(RedisError::from((ErrorKind::IoError, "connection timed out"))),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
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

    /// Execute a Redis operation with automatic retry logic
    ///
    /// Each attempt is bounded by the configured response timeout; only
    /// transient failures are retried.
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let max_attempts = self.config.max_retries.max(1);
        let response_timeout = Duration::from_secs(self.config.response_timeout);
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            let result = match timeout(response_timeout, operation(conn)).await {
                Ok(result) => result,
                Err(_) => Err(RedisError::from((ErrorKind::IoError, "response timed out"))),
            };

            match result {
                Ok(result) => return Ok(result),
                Err(e) if attempts < max_attempts && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

#[async_trait]
impl CacheClient for RedisClient {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", key, expiry_seconds);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);

        let value = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.get::<_, Option<String>>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to get key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        if value.is_none() {
            debug!("Key '{}' not found", key);
        }
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);

        let deleted_count = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to delete key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        Ok(deleted_count > 0)
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        debug!("Getting TTL for key '{}'", key);

        let ttl = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to get TTL for key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        // -2: no such key, -1: key without expiry
        Ok(match ttl {
            -2 => None,
            ttl => Some(ttl),
        })
    }

    async fn health_check(&self) -> Result<bool, InfrastructureError> {
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
}

/// Check if a Redis error is transient and the operation should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        ErrorKind::IoError | ErrorKind::BusyLoadingError | ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
