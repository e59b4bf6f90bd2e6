//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for Tokengate. It provides
//! the concrete session stores behind the `SessionStore` contract of
//! `tg_core` and the tracing setup used by binaries embedding the library.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis and in-process cache clients behind one `CacheClient` trait
//! - **Session store**: `SessionStore` implemented over any cache client
//! - **Telemetry**: `tracing-subscriber` initialisation from `LoggingConfig`

use tg_core::errors::DomainError;

/// Cache module - Redis client, in-memory cache and session store
pub mod cache;

/// Telemetry module - tracing subscriber setup
pub mod telemetry;

pub use cache::{
    create_session_store, CacheClient, CacheSessionStore, MemoryCache, RedisClient,
};
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::Config { message },
            other => DomainError::Storage {
                message: other.to_string(),
            },
        }
    }
}
