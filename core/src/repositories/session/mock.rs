//! Mock implementation of SessionStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::session::SessionRecord;
use crate::errors::DomainError;

use super::r#trait::SessionStore;

/// Mock session store keyed by session key, honouring record expiry on read
pub struct MockSessionStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
    should_fail: AtomicBool,
}

impl MockSessionStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of stored records, expired or not
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Raw record lookup, bypassing expiry
    pub async fn record(&self, principal_id: i64) -> Option<SessionRecord> {
        self.records
            .read()
            .await
            .get(&SessionRecord::key_for(principal_id))
            .cloned()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "mock session store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn put(&self, principal_id: i64, token: &str, ttl_seconds: u64) -> Result<(), DomainError> {
        self.check_failure()?;
        let record = SessionRecord::new(principal_id, token.to_string(), ttl_seconds);
        self.records.write().await.insert(record.key(), record);
        Ok(())
    }

    async fn get(&self, principal_id: i64) -> Result<Option<String>, DomainError> {
        self.check_failure()?;
        let records = self.records.read().await;
        Ok(records
            .get(&SessionRecord::key_for(principal_id))
            .filter(|r| !r.is_expired())
            .map(|r| r.refresh_token.clone()))
    }

    async fn delete(&self, principal_id: i64) -> Result<(), DomainError> {
        self.check_failure()?;
        self.records
            .write()
            .await
            .remove(&SessionRecord::key_for(principal_id));
        Ok(())
    }
}
