//! Authentication service module
//!
//! Bearer-token authentication, refresh and sign-out for request handlers,
//! built on the token service and an upstream principal lookup.

mod resolver;
mod service;

#[cfg(test)]
mod tests;

pub use resolver::PrincipalResolver;
pub use service::{AuthContext, AuthenticationService};
