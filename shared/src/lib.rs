//! Shared configuration for Tokengate
//!
//! This crate provides the configuration types used across the workspace:
//! - Token signing secret and lifetimes
//! - Session cache backend selection
//! - Environment detection and logging settings

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CacheStrategyConfig, CacheType, Environment, JwtConfig,
    LoggingConfig, SettingsError,
};
