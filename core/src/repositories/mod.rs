//! Repository interfaces for session persistence.

pub mod session;

pub use session::SessionStore;

#[cfg(test)]
pub use session::MockSessionStore;
