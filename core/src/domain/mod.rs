//! Domain layer containing the principal, claims and session entities.

pub mod entities;

pub use entities::{Claims, Principal, Role, SessionRecord, JWT_ISSUER, SESSION_KEY_PREFIX};
