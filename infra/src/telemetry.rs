//! Tracing subscriber initialisation

use tg_shared::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

use crate::InfrastructureError;

/// Installs the global `tracing` subscriber described by `config`
///
/// `RUST_LOG` takes precedence over the configured level. Returns an error if
/// a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = build_filter(config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| InfrastructureError::General(format!("tracing already initialised: {}", e)))
}

/// Filter from `RUST_LOG`, falling back to the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            InfrastructureError::Config(format!("invalid log level '{}': {}", config.level, e))
        }),
    }
}
