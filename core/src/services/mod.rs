//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthContext, AuthenticationService, PrincipalResolver};
pub use token::{TokenCodec, TokenService, TokenServiceConfig};
