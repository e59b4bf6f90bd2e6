//! Token claims for JWT-based session management.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::principal::{Principal, Role};
use crate::errors::TokenError;

/// Default JWT issuer
pub const JWT_ISSUER: &str = "tokengate";

/// Claims structure for JWT payload
///
/// `sub`, `email`, `role` and `exp` are a compatibility contract with any
/// consumer decoding these tokens independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID, stringified)
    pub sub: String,

    /// Principal email
    pub email: String,

    /// Principal role ("USER" or "ADMIN")
    pub role: String,

    /// Expiration timestamp (epoch seconds)
    pub exp: i64,

    /// Issued at timestamp
    pub iat: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for a principal expiring `lifetime_seconds` from now
    ///
    /// # Arguments
    ///
    /// * `principal` - Identity snapshot to embed
    /// * `lifetime_seconds` - Offset from now; negative values yield already-expired claims
    /// * `issuer` - Value of the `iss` claim
    ///
    /// Fails with `TokenGenerationFailed` when the expiry is not representable.
    pub fn for_principal(
        principal: &Principal,
        lifetime_seconds: i64,
        issuer: &str,
    ) -> Result<Self, TokenError> {
        Self::issued_at(principal, lifetime_seconds, issuer, Utc::now())
    }

    /// Creates claims as if issued at `now`
    pub fn issued_at(
        principal: &Principal,
        lifetime_seconds: i64,
        issuer: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, TokenError> {
        let expiry = Duration::try_seconds(lifetime_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: principal.id.to_string(),
            email: principal.email.clone(),
            role: principal.role.as_str().to_string(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Checks if the claims have expired (`exp <= now`)
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Checks expiry against an explicit epoch-seconds clock
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    /// Gets the principal ID from the subject
    pub fn principal_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidToken)
    }

    /// Gets the role from the role claim
    pub fn role(&self) -> Result<Role, TokenError> {
        self.role.parse().map_err(|_| TokenError::InvalidToken)
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
