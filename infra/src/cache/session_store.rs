//! Session store backed by a cache client
//!
//! Keeps the single refresh token per principal under
//! `{prefix}:Session_{principal_id}` (or `Session_{principal_id}` without a
//! prefix) with the session TTL applied by the cache.

use async_trait::async_trait;
use tg_core::domain::entities::session::SessionRecord;
use tg_core::errors::DomainError;
use tg_core::repositories::SessionStore;
use tg_shared::config::prefixed_key;
use tracing::{debug, info};

use super::client::CacheClient;

/// `SessionStore` over any [`CacheClient`]
#[derive(Clone)]
pub struct CacheSessionStore<C: CacheClient> {
    /// Cache client for session operations
    client: C,
    /// Optional namespace prepended to every session key
    key_prefix: Option<String>,
}

impl<C: CacheClient> CacheSessionStore<C> {
    /// Create a new session store
    ///
    /// # Arguments
    /// * `client` - Cache client holding the sessions
    /// * `key_prefix` - Optional key namespace, e.g. `tokengate`
    pub fn new(client: C, key_prefix: Option<String>) -> Self {
        Self { client, key_prefix }
    }

    /// Physical cache key for a principal's session
    pub fn session_key(&self, principal_id: i64) -> String {
        prefixed_key(
            self.key_prefix.as_deref(),
            &SessionRecord::key_for(principal_id),
        )
    }

    /// Remaining session lifetime in seconds, `None` without a session
    pub async fn remaining_ttl(&self, principal_id: i64) -> Result<Option<i64>, DomainError> {
        Ok(self.client.ttl(&self.session_key(principal_id)).await?)
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: CacheClient> SessionStore for CacheSessionStore<C> {
    async fn put(&self, principal_id: i64, token: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        let key = self.session_key(principal_id);

        // A zero TTL leaves nothing to store; drop any previous session instead
        if ttl_seconds == 0 {
            debug!(principal_id, "Zero session TTL, removing session");
            self.client.delete(&key).await?;
            return Ok(());
        }

        self.client.set_with_expiry(&key, token, ttl_seconds).await?;
        info!(principal_id, ttl_seconds, "Session stored");
        Ok(())
    }

    async fn get(&self, principal_id: i64) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(&self.session_key(principal_id)).await?)
    }

    async fn delete(&self, principal_id: i64) -> Result<(), DomainError> {
        let existed = self.client.delete(&self.session_key(principal_id)).await?;
        debug!(principal_id, existed, "Session removed");
        Ok(())
    }
}
