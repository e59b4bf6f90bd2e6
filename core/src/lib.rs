//! # Tokengate Core
//!
//! Core domain layer for token-based session management.
//! This crate contains the principal and claims entities, the token codec and
//! token service, the session store contract and the error types that the
//! infrastructure crate builds on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
