//! Key/value cache contract shared by the Redis and in-memory backends

use async_trait::async_trait;

use crate::InfrastructureError;

/// Minimal string cache with per-key expiry
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Store `value` under `key`, replacing any previous value, for `expiry_seconds`
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError>;

    /// Current value, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError>;

    /// Remove a key; returns whether it existed
    async fn delete(&self, key: &str) -> Result<bool, InfrastructureError>;

    /// Remaining time to live in seconds, `None` when the key is absent
    async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError>;

    /// Connectivity check
    async fn health_check(&self) -> Result<bool, InfrastructureError>;
}
