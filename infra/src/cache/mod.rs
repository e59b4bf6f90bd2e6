//! Cache module for session storage
//!
//! This module provides the Redis client with retry logic, an in-process
//! cache for development and tests, and the `SessionStore` implementation
//! built on either of them.

pub mod client;
pub mod factory;
pub mod memory_cache;
pub mod redis_client;
pub mod session_store;


pub use client::CacheClient;
pub use factory::create_session_store;
pub use memory_cache::MemoryCache;
pub use redis_client::RedisClient;
pub use session_store::CacheSessionStore;

// Re-export commonly used types
pub use tg_shared::config::{CacheConfig, MemoryCacheConfig};
