//! Construction of the configured session store backend

use std::sync::Arc;
use tg_core::repositories::SessionStore;
use tg_shared::config::{CacheStrategyConfig, CacheType};
use tracing::info;

use super::memory_cache::MemoryCache;
use super::redis_client::RedisClient;
use super::session_store::CacheSessionStore;
use crate::InfrastructureError;

/// Builds the session store selected by `config.cache_type`
///
/// Missing backend sections fall back to their defaults.
pub async fn create_session_store(
    config: &CacheStrategyConfig,
) -> Result<Arc<dyn SessionStore>, InfrastructureError> {
    match config.cache_type {
        CacheType::Redis => {
            let redis_config = config.redis.clone().unwrap_or_default();
            let key_prefix = redis_config.key_prefix.clone();
            let client = RedisClient::new(redis_config).await?;

            info!("Using Redis session store");
            Ok(Arc::new(CacheSessionStore::new(client, key_prefix)))
        }
        CacheType::Memory => {
            let memory_config = config.memory.clone().unwrap_or_default();
            let cache = MemoryCache::new(&memory_config);

            info!(
                max_entries = memory_config.max_entries,
                "Using in-memory session store"
            );
            Ok(Arc::new(CacheSessionStore::new(
                cache,
                memory_config.key_prefix,
            )))
        }
    }
}
