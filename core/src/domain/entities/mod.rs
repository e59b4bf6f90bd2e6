//! Domain entities representing principals, token claims and sessions.

pub mod principal;
pub mod session;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use principal::{Principal, Role};
pub use session::{SessionRecord, SESSION_KEY_PREFIX};
pub use token::{Claims, JWT_ISSUER};
