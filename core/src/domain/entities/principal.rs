//! Principal entity: the identity snapshot a token is issued for.

use serde::{Deserialize, Serialize};

/// Authorization role carried in the `role` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Wire representation used in token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Identity snapshot taken at token-issue time.
///
/// Produced by an external identity lookup and never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Unique principal identifier
    pub id: i64,

    /// Email address
    pub email: String,

    /// Human-readable name
    pub display_name: String,

    /// Authorization role
    pub role: Role,
}

impl Principal {
    /// Creates a new principal snapshot
    pub fn new(
        id: i64,
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
