//! Session record: the single refresh token stored per principal.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of every session key
pub const SESSION_KEY_PREFIX: &str = "Session_";

/// Upper bound applied to TTLs when computing `expires_at` (100 years)
const MAX_TTL_SECONDS: u64 = 100 * 365 * 86400;

/// Stored mapping from a principal to its current refresh token.
///
/// At most one record exists per principal; writing a new one replaces the
/// previous token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Owning principal
    pub principal_id: i64,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Time to live requested from the backing cache
    pub ttl_seconds: u64,

    /// Absolute expiry derived from the TTL at creation time
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(principal_id: i64, refresh_token: String, ttl_seconds: u64) -> Self {
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds.min(MAX_TTL_SECONDS) as i64);

        Self {
            principal_id,
            refresh_token,
            ttl_seconds,
            expires_at,
        }
    }

    /// Session key for a principal, e.g. `Session_42`
    pub fn key_for(principal_id: i64) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, principal_id)
    }

    pub fn key(&self) -> String {
        Self::key_for(self.principal_id)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
