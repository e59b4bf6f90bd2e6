//! Token service module for JWT session management
//!
//! This module handles all token-related operations including:
//! - Stateless token issue and verification (`TokenCodec`)
//! - Refresh session bookkeeping through a `SessionStore`
//! - Access token refresh and sign-out

mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
