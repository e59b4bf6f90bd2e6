//! Authentication and session configuration

use serde::{Deserialize, Serialize};

use super::SettingsError;

/// Secret shipped in defaults; never acceptable outside development.
const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Minimum secret length in bytes (256 bits for HS256).
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime in seconds (10 years).
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 10 * 365 * 86400;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Symmetric secret used to sign access and refresh tokens
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds (also the session TTL)
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Algorithm for JWT signing (HS256, HS384, HS512)
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: default_issuer(),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Set both lifetimes in seconds
    pub fn with_lifetimes(mut self, access_seconds: i64, refresh_seconds: i64) -> Self {
        self.access_token_expiry = access_seconds;
        self.refresh_token_expiry = refresh_seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Check the deployment invariants: secret strength and
    /// `0 < access_token_expiry < refresh_token_expiry <= MAX_TOKEN_LIFETIME_SECONDS`.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(SettingsError::Invalid(format!(
                "jwt secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                self.secret.len()
            )));
        }

        if self.access_token_expiry <= 0 {
            return Err(SettingsError::Invalid(
                "access token expiry must be positive".to_string(),
            ));
        }

        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(SettingsError::Invalid(format!(
                "refresh token expiry ({}s) must exceed access token expiry ({}s)",
                self.refresh_token_expiry, self.access_token_expiry
            )));
        }

        if self.refresh_token_expiry > MAX_TOKEN_LIFETIME_SECONDS {
            return Err(SettingsError::Invalid(format!(
                "refresh token expiry ({}s) must not exceed {}s",
                self.refresh_token_expiry, MAX_TOKEN_LIFETIME_SECONDS
            )));
        }

        Ok(())
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();

        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_token_expiry);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.refresh_token_expiry);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer);
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm);

        Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry,
                refresh_token_expiry,
                issuer,
                algorithm,
            },
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }

    /// Get access token expiry in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.jwt.access_token_expiry
    }

    /// Get refresh token expiry in seconds
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.jwt.refresh_token_expiry
    }
}

fn default_issuer() -> String {
    String::from("tokengate")
}

fn default_algorithm() -> String {
    String::from("HS256")
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG_SECRET: &str = "an-unguessable-secret-of-at-least-32-bytes";

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.issuer, "tokengate");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new(STRONG_SECRET)
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert!(!config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let config = JwtConfig::new("too-short");
        assert!(matches!(config.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_lifetimes() {
        let config = JwtConfig::new(STRONG_SECRET).with_lifetimes(3600, 3600);
        assert!(config.validate().is_err());

        let config = JwtConfig::new(STRONG_SECRET).with_lifetimes(0, 3600);
        assert!(config.validate().is_err());

        let config = JwtConfig::new(STRONG_SECRET).with_lifetimes(3600, 86400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unbounded_lifetimes() {
        let config = JwtConfig::new(STRONG_SECRET).with_lifetimes(3600, i64::MAX);
        assert!(matches!(config.validate(), Err(SettingsError::Invalid(_))));

        let config =
            JwtConfig::new(STRONG_SECRET).with_lifetimes(3600, MAX_TOKEN_LIFETIME_SECONDS);
        assert!(config.validate().is_ok());
    }
}
