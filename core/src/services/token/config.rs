//! Configuration for the token service

use std::str::FromStr;

use jsonwebtoken::Algorithm;
use tg_shared::config::{JwtConfig, MAX_TOKEN_LIFETIME_SECONDS, MIN_SECRET_BYTES};

use crate::domain::entities::token::JWT_ISSUER;
use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Value of the `iss` claim, checked on decode
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token lifetime in seconds; also the session TTL
    pub refresh_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            access_token_expiry_seconds: 15 * 60,
            refresh_token_expiry_seconds: 7 * 24 * 60 * 60,
        }
    }
}

impl TokenServiceConfig {
    /// Builds the service configuration from deployment settings
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = Algorithm::from_str(&jwt.algorithm).map_err(|_| DomainError::Config {
            message: format!("unsupported jwt algorithm: {}", jwt.algorithm),
        })?;

        let config = Self {
            jwt_secret: jwt.secret.clone(),
            algorithm,
            issuer: jwt.issuer.clone(),
            access_token_expiry_seconds: jwt.access_token_expiry,
            refresh_token_expiry_seconds: jwt.refresh_token_expiry,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks `0 < access < refresh <= MAX_TOKEN_LIFETIME_SECONDS` and the secret length
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::Config {
                message: format!("jwt secret must be at least {} bytes", MIN_SECRET_BYTES),
            });
        }

        if self.access_token_expiry_seconds <= 0 {
            return Err(DomainError::Config {
                message: "access token lifetime must be positive".to_string(),
            });
        }

        if self.access_token_expiry_seconds >= self.refresh_token_expiry_seconds {
            return Err(DomainError::Config {
                message: format!(
                    "access token lifetime ({}s) must be shorter than refresh token lifetime ({}s)",
                    self.access_token_expiry_seconds, self.refresh_token_expiry_seconds
                ),
            });
        }

        if self.refresh_token_expiry_seconds > MAX_TOKEN_LIFETIME_SECONDS {
            return Err(DomainError::Config {
                message: format!(
                    "refresh token lifetime ({}s) must not exceed {}s",
                    self.refresh_token_expiry_seconds, MAX_TOKEN_LIFETIME_SECONDS
                ),
            });
        }

        Ok(())
    }

    /// TTL applied to the stored session
    pub fn session_ttl_seconds(&self) -> u64 {
        u64::try_from(self.refresh_token_expiry_seconds).unwrap_or(0)
    }
}
