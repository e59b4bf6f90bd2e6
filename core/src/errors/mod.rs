//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError};

use thiserror::Error;
use tg_shared::SettingsError;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Session cache backend failure (connectivity, protocol)
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    /// True when the failure is an expired (but authentic) token, which
    /// callers may answer with the refresh flow instead of a new sign-in.
    pub fn is_expired_token(&self) -> bool {
        matches!(self, DomainError::Token(TokenError::ExpiredToken))
    }

    /// True for failures that require the principal to sign in again.
    pub fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            DomainError::Token(TokenError::InvalidToken)
                | DomainError::Token(TokenError::RefreshTokenNotFound)
                | DomainError::Auth(_)
        )
    }
}

impl From<SettingsError> for DomainError {
    fn from(err: SettingsError) -> Self {
        DomainError::Config {
            message: err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
