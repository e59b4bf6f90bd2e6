//! Stateless JWT encoding and verification

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tg_shared::config::MIN_SECRET_BYTES;
use tracing::{debug, warn};

use crate::domain::entities::principal::Principal;
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies compact tokens with a symmetric secret.
///
/// Holds only the keys derived from the injected secret, so a codec can be
/// shared freely between requests.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec for an HMAC algorithm
    ///
    /// # Arguments
    ///
    /// * `secret` - Shared signing secret, at least 32 bytes
    /// * `algorithm` - HS256, HS384 or HS512
    /// * `issuer` - Issuer written into and required from every token
    ///
    /// # Returns
    ///
    /// * `Ok(TokenCodec)` - Ready to issue and verify tokens
    /// * `Err(DomainError::Config)` - Weak secret or non-HMAC algorithm
    pub fn new(secret: &str, algorithm: Algorithm, issuer: &str) -> Result<Self, DomainError> {
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(DomainError::Config {
                message: format!("{:?} is not a symmetric signing algorithm", algorithm),
            });
        }

        if secret.len() < MIN_SECRET_BYTES {
            return Err(DomainError::Config {
                message: format!("jwt secret must be at least {} bytes", MIN_SECRET_BYTES),
            });
        }

        // Expiry is checked in `verify`: `exp <= now` is expired, no leeway.
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Ok(Self {
            algorithm,
            issuer: issuer.to_string(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Creates a codec from the token service configuration
    pub fn from_config(config: &TokenServiceConfig) -> Result<Self, DomainError> {
        Self::new(&config.jwt_secret, config.algorithm, &config.issuer)
    }

    /// Issues a signed token for `principal` expiring `lifetime_seconds` from now
    ///
    /// Negative lifetimes produce a token that is already expired. Lifetimes
    /// whose expiry is out of range fail with `TokenGenerationFailed`.
    pub fn issue(&self, principal: &Principal, lifetime_seconds: i64) -> Result<String, DomainError> {
        let claims = Claims::for_principal(principal, lifetime_seconds, &self.issuer)?;
        self.encode_claims(&claims)
    }

    /// Encodes and signs already-built claims
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies signature, structure and expiry
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Authentic and `exp > now`
    /// * `Err(TokenError::ExpiredToken)` - Authentic but `exp <= now`
    /// * `Err(TokenError::InvalidToken)` - Bad signature or malformed
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.decode_ignoring_expiry(token)?;

        if claims.is_expired() {
            debug!(sub = %claims.sub, exp = claims.exp, "Token expired");
            return Err(DomainError::Token(TokenError::ExpiredToken));
        }

        Ok(claims)
    }

    /// Verifies signature and structure but accepts expired tokens
    ///
    /// Used only to recover the subject of an expired access token during
    /// the refresh flow.
    pub fn decode_ignoring_expiry(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => warn!("Token signature mismatch"),
                    kind => debug!(?kind, "Token rejected"),
                }
                DomainError::Token(TokenError::InvalidToken)
            })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}
