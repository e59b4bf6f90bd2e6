//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing secret and access/refresh lifetimes
//! - `cache` - Session cache backend (Redis or in-memory)
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod cache;
pub mod environment;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, MAX_TOKEN_LIFETIME_SECONDS, MIN_SECRET_BYTES};
pub use cache::{prefixed_key, CacheConfig, CacheStrategyConfig, CacheType, MemoryCacheConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Prefix for layered environment overrides, e.g. `TOKENGATE__AUTH__JWT__SECRET`
pub const ENV_PREFIX: &str = "TOKENGATE";

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheStrategyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from process environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            auth: AuthConfig::from_env(),
            cache: CacheStrategyConfig::from_env(),
            logging,
        }
    }

    /// Load configuration from an optional TOML file layered under
    /// `TOKENGATE__*` environment variables, then validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = settings.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Validate cross-field invariants
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.auth.jwt.validate()?;

        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(SettingsError::Invalid(
                "default jwt secret is not allowed in production".to_string(),
            ));
        }

        Ok(())
    }
}
