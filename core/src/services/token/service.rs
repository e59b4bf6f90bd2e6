//! Main token service implementation

use tracing::{debug, info, warn};

use crate::domain::entities::principal::Principal;
use crate::domain::entities::session::SessionRecord;
use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::repositories::SessionStore;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Service managing access tokens and the per-principal refresh session
///
/// The only component callers interact with: it mints tokens through
/// [`TokenCodec`] and keeps exactly one refresh token per principal in the
/// [`SessionStore`].
pub struct TokenService<S: SessionStore> {
    store: S,
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl<S: SessionStore> TokenService<S> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Session store holding refresh tokens
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or `DomainError::Config` when the access lifetime
    /// is not strictly shorter than the refresh lifetime or the secret is weak
    pub fn new(store: S, config: TokenServiceConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let codec = TokenCodec::from_config(&config)?;

        Ok(Self {
            store,
            codec,
            config,
        })
    }

    /// Issues a refresh/access token pair and starts a session
    ///
    /// The refresh token is stored under the principal's session key, replacing
    /// any previous session; only the access token is returned.
    ///
    /// # Arguments
    ///
    /// * `principal` - Identity snapshot to embed in both tokens
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The access token
    /// * `Err(DomainError)` - Minting or storage failed; nothing is stored if minting fails
    pub async fn create_full_tokens(&self, principal: &Principal) -> Result<String, DomainError> {
        let refresh_token = self
            .codec
            .issue(principal, self.config.refresh_token_expiry_seconds)?;
        let access_token = self
            .codec
            .issue(principal, self.config.access_token_expiry_seconds)?;

        let record = SessionRecord::new(
            principal.id,
            refresh_token,
            self.config.session_ttl_seconds(),
        );
        self.store
            .put(record.principal_id, &record.refresh_token, record.ttl_seconds)
            .await?;

        info!(
            principal_id = principal.id,
            ttl_seconds = record.ttl_seconds,
            "Session created"
        );

        Ok(access_token)
    }

    /// Issues a bare access token without touching the session store
    pub fn create_access_token(&self, principal: &Principal) -> Result<String, DomainError> {
        self.codec
            .issue(principal, self.config.access_token_expiry_seconds)
    }

    /// Returns the stored refresh token for a principal
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The current refresh token
    /// * `Err(TokenError::RefreshTokenNotFound)` - No session exists
    pub async fn get_refresh_token(&self, principal_id: i64) -> Result<String, DomainError> {
        self.store
            .get(principal_id)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshTokenNotFound))
    }

    /// Mints a new access token if the principal holds a valid session
    ///
    /// The stored refresh token must exist and pass full verification. The new
    /// access token is built from the supplied `principal`, not from the stored
    /// token's claims. The refresh token is neither rotated nor re-stored.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - New access token
    /// * `Err(TokenError::RefreshTokenNotFound)` - No session exists
    /// * `Err(TokenError::ExpiredToken)` - Stored refresh token has expired
    /// * `Err(TokenError::InvalidToken)` - Stored refresh token is not authentic
    pub async fn refresh_access_token(&self, principal: &Principal) -> Result<String, DomainError> {
        let refresh_token = self.get_refresh_token(principal.id).await?;

        let claims = self.codec.verify(&refresh_token).map_err(|e| {
            warn!(principal_id = principal.id, error = %e, "Stored refresh token rejected");
            e
        })?;

        if claims.sub != principal.id.to_string() {
            warn!(
                principal_id = principal.id,
                "Stored refresh token belongs to another principal"
            );
            return Err(DomainError::Token(TokenError::InvalidToken));
        }

        debug!(principal_id = principal.id, "Refreshing access token");
        self.create_access_token(principal)
    }

    /// Ends the principal's session; succeeds when none exists
    pub async fn delete_refresh_token(&self, principal_id: i64) -> Result<(), DomainError> {
        self.store.delete(principal_id).await?;
        info!(principal_id, "Session deleted");
        Ok(())
    }

    /// Decodes an access token for request authentication
    ///
    /// # Arguments
    ///
    /// * `access_token` - Token presented by the caller
    /// * `allow_expired_for_refresh` - Accept expired tokens; only for the refresh flow
    pub fn get_authenticated_principal(
        &self,
        access_token: &str,
        allow_expired_for_refresh: bool,
    ) -> Result<Claims, DomainError> {
        if allow_expired_for_refresh {
            self.codec.decode_ignoring_expiry(access_token)
        } else {
            self.codec.verify(access_token)
        }
    }

    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.config.access_token_expiry_seconds
    }

    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.config.refresh_token_expiry_seconds
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
