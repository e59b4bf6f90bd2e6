//! Session store trait defining the interface for refresh token persistence.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DomainError;

/// TTL-bound key/value storage holding one refresh token per principal
///
/// Implementations address entries by the session key derived from the
/// principal id (`SessionRecord::key_for`) and delegate expiry to the backing
/// cache. Tokens are opaque strings.
///
/// # Semantics
/// - `put` overwrites unconditionally; last write wins
/// - `get` reports a missing or expired entry as `None`, never as an error
/// - `delete` of a missing entry succeeds
/// - Backend failures surface as `DomainError::Storage` and are not retried
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `token` for the principal, replacing any previous entry
    ///
    /// # Arguments
    /// * `principal_id` - Owner of the session
    /// * `token` - Refresh token to store
    /// * `ttl_seconds` - New absolute expiry measured from now
    ///
    /// # Example
    /// ```no_run
    /// # use tg_core::repositories::SessionStore;
    /// # async fn example(store: &impl SessionStore) -> Result<(), Box<dyn std::error::Error>> {
    /// store.put(42, "refresh-token", 86400).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn put(&self, principal_id: i64, token: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Fetch the current token for the principal
    ///
    /// # Returns
    /// * `Ok(Some(token))` - Entry present and not expired
    /// * `Ok(None)` - No entry (never issued, deleted, or evicted)
    /// * `Err(DomainError)` - Backend failure
    async fn get(&self, principal_id: i64) -> Result<Option<String>, DomainError>;

    /// Remove the principal's entry if present
    async fn delete(&self, principal_id: i64) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn put(&self, principal_id: i64, token: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        (**self).put(principal_id, token, ttl_seconds).await
    }

    async fn get(&self, principal_id: i64) -> Result<Option<String>, DomainError> {
        (**self).get(principal_id).await
    }

    async fn delete(&self, principal_id: i64) -> Result<(), DomainError> {
        (**self).delete(principal_id).await
    }
}
