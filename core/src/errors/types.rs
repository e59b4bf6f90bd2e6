//! Token and authentication error types
//!
//! Callers match on these variants to decide between forcing a new sign-in
//! and starting the refresh flow. Display strings are stable and never carry
//! token material.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch, malformed structure, wrong algorithm or issuer
    #[error("Invalid token")]
    InvalidToken,

    /// Signature is valid but the embedded expiry has passed
    #[error("Token expired")]
    ExpiredToken,

    /// No session is stored for the principal
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Request-level authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Principal not found: {principal_id}")]
    PrincipalNotFound { principal_id: i64 },
}
