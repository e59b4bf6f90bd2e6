//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub connection_timeout: u64,

    /// Response timeout in seconds
    #[serde(default = "default_timeout")]
    pub response_timeout: u64,

    /// Enable cache key prefix
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,

    /// Attempt budget for connecting and for each cache operation;
    /// only transient failures are retried
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between attempts in milliseconds (doubled each time)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: default_timeout(),
            response_timeout: default_timeout(),
            key_prefix: None,
            database: 0,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let key_prefix = std::env::var("CACHE_KEY_PREFIX")
            .ok()
            .filter(|p| !p.is_empty());

        Self {
            url,
            key_prefix,
            ..Default::default()
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        prefixed_key(self.key_prefix.as_deref(), key)
    }
}

/// In-memory cache configuration (for development/testing)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of live entries; 0 means unbounded
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Key prefix, mirroring the Redis setting
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            key_prefix: None,
        }
    }
}

impl MemoryCacheConfig {
    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        prefixed_key(self.key_prefix.as_deref(), key)
    }
}

/// Cache strategy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheStrategyConfig {
    /// Cache type (redis, memory)
    #[serde(default = "default_cache_type")]
    pub cache_type: CacheType,

    /// Redis configuration
    #[serde(default)]
    pub redis: Option<CacheConfig>,

    /// Memory cache configuration
    #[serde(default)]
    pub memory: Option<MemoryCacheConfig>,
}

/// Cache type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Redis,
    Memory,
}

impl std::str::FromStr for CacheType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheType::Redis),
            "memory" | "in-memory" => Ok(CacheType::Memory),
            _ => Err(format!("Invalid cache type: {}", s)),
        }
    }
}

impl Default for CacheStrategyConfig {
    fn default() -> Self {
        Self {
            cache_type: default_cache_type(),
            redis: Some(CacheConfig::default()),
            memory: Some(MemoryCacheConfig::default()),
        }
    }
}

impl CacheStrategyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let cache_type = std::env::var("CACHE_TYPE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_cache_type);
        let redis = CacheConfig::from_env();
        let memory = MemoryCacheConfig {
            key_prefix: redis.key_prefix.clone(),
            ..Default::default()
        };

        Self {
            cache_type,
            redis: Some(redis),
            memory: Some(memory),
        }
    }

    /// In-memory strategy, used by tests and local development
    pub fn memory() -> Self {
        Self {
            cache_type: CacheType::Memory,
            redis: None,
            memory: Some(MemoryCacheConfig::default()),
        }
    }
}

/// Joins an optional prefix and a key as `{prefix}:{key}`
pub fn prefixed_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, key),
        None => key.to_string(),
    }
}

fn default_timeout() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_max_entries() -> usize {
    100_000
}

fn default_cache_type() -> CacheType {
    CacheType::Redis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.database, 0);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_cache_config_with_prefix() {
        let config = CacheConfig::new("redis://cache:6379")
            .with_prefix("tokengate")
            .with_database(2);

        assert_eq!(config.make_key("Session_42"), "tokengate:Session_42");
        assert_eq!(config.database, 2);
    }

    #[test]
    fn test_cache_key_without_prefix() {
        let config = CacheConfig::default();
        assert_eq!(config.make_key("Session_42"), "Session_42");
    }

    #[test]
    fn test_database_is_clamped() {
        let config = CacheConfig::default().with_database(99);
        assert_eq!(config.database, 15);
    }

    #[test]
    fn test_cache_type_parsing() {
        assert_eq!("redis".parse::<CacheType>(), Ok(CacheType::Redis));
        assert_eq!("MEMORY".parse::<CacheType>(), Ok(CacheType::Memory));
        assert!("memcached".parse::<CacheType>().is_err());
    }

    #[test]
    fn test_cache_strategy() {
        let config = CacheStrategyConfig::default();
        assert_eq!(config.cache_type, CacheType::Redis);
        assert!(config.redis.is_some());
        assert!(config.memory.is_some());

        let memory = CacheStrategyConfig::memory();
        assert_eq!(memory.cache_type, CacheType::Memory);
        assert!(memory.redis.is_none());
    }
}
