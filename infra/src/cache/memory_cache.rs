//! In-process cache with per-entry expiry
//!
//! Stand-in for Redis in development and tests. Entries carry an absolute
//! deadline and read as absent once it has passed. A bounded cache drops
//! expired entries when a write finds it full; otherwise an expired entry
//! stays in the map until its key is overwritten or deleted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tg_shared::config::MemoryCacheConfig;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use super::client::CacheClient;
use crate::InfrastructureError;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    deadline: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.deadline
    }
}

/// In-memory cache client
#[derive(Debug)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    /// Maximum number of entries; 0 means unbounded
    max_entries: usize,
}

impl MemoryCache {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: config.max_entries,
        }
    }

    /// Unbounded cache
    pub fn unbounded() -> Self {
        Self::new(&MemoryCacheConfig {
            max_entries: 0,
            ..Default::default()
        })
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Make room for one new key, dropping expired entries first and then the
    /// entry closest to expiry
    fn evict_for_insert(&self, entries: &mut HashMap<String, Entry>, now: Instant) {
        if self.max_entries == 0 || entries.len() < self.max_entries {
            return;
        }

        entries.retain(|_, e| e.is_live(now));

        while entries.len() >= self.max_entries {
            let Some(victim) = entries
                .iter()
                .min_by_key(|(_, e)| e.deadline)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            debug!("Evicting key '{}' from memory cache", victim);
            entries.remove(&victim);
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(&MemoryCacheConfig::default())
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", key, expiry_seconds);

        let now = Instant::now();
        let deadline = now
            .checked_add(Duration::from_secs(expiry_seconds))
            .ok_or_else(|| {
                InfrastructureError::General(format!("expiry of {}s is out of range", expiry_seconds))
            })?;

        let mut entries = self.entries.write().await;
        if !entries.contains_key(key) {
            self.evict_for_insert(&mut entries, now);
        }
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                deadline,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);

        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);

        let now = Instant::now();
        Ok(self
            .entries
            .write()
            .await
            .remove(key)
            .is_some_and(|e| e.is_live(now)))
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| {
                let remaining = e.deadline.saturating_duration_since(now);
                i64::try_from(remaining.as_secs()).unwrap_or(i64::MAX)
            }))
    }

    async fn health_check(&self) -> Result<bool, InfrastructureError> {
        Ok(true)
    }
}
