//! Request-level authentication on top of the token service

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::principal::Principal;
use crate::domain::entities::token::Claims;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::SessionStore;
use crate::services::token::TokenService;

use super::resolver::PrincipalResolver;

const BEARER_SCHEME: &str = "Bearer ";

/// Authenticated request identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Current principal as returned by the resolver
    pub principal: Principal,
    /// Claims of the presented access token
    pub claims: Claims,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.principal.is_admin()
    }

    pub fn principal_id(&self) -> i64 {
        self.principal.id
    }
}

/// Authentication service for bearer-token requests
pub struct AuthenticationService<S, R>
where
    S: SessionStore,
    R: PrincipalResolver,
{
    /// Token service for JWT and session management
    token_service: Arc<TokenService<S>>,
    /// Upstream principal lookup
    resolver: R,
}

impl<S, R> AuthenticationService<S, R>
where
    S: SessionStore,
    R: PrincipalResolver,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `token_service` - Service for JWT token management
    /// * `resolver` - Lookup of principals by id
    pub fn new(token_service: Arc<TokenService<S>>, resolver: R) -> Self {
        Self {
            token_service,
            resolver,
        }
    }

    /// Extracts the token from an `Authorization: Bearer <token>` header value
    pub fn extract_bearer_token(authorization_header: &str) -> DomainResult<&str> {
        let scheme = authorization_header
            .get(..BEARER_SCHEME.len())
            .ok_or(AuthError::MissingToken)?;
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            return Err(AuthError::MissingToken.into());
        }

        let token = authorization_header[BEARER_SCHEME.len()..].trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        Ok(token)
    }

    /// Authenticates a request carrying a live access token
    ///
    /// # Returns
    ///
    /// * `Ok(AuthContext)` - Token verified and principal still exists
    /// * `Err(AuthError::MissingToken)` - No bearer token in the header
    /// * `Err(TokenError::ExpiredToken)` - Caller should use the refresh flow
    /// * `Err(TokenError::InvalidToken)` - Caller must sign in again
    /// * `Err(AuthError::PrincipalNotFound)` - Principal was removed
    pub async fn authenticate(&self, authorization_header: &str) -> DomainResult<AuthContext> {
        let token = Self::extract_bearer_token(authorization_header)?;
        let claims = self.token_service.get_authenticated_principal(token, false)?;
        let principal = self.resolve(&claims).await?;

        Ok(AuthContext { principal, claims })
    }

    /// Mints a new access token from a possibly expired one
    ///
    /// The stored session decides whether the refresh is allowed; the new
    /// token carries the principal as currently resolved.
    pub async fn refresh(&self, authorization_header: &str) -> DomainResult<String> {
        let token = Self::extract_bearer_token(authorization_header)?;
        let claims = self.token_service.get_authenticated_principal(token, true)?;
        let principal = self.resolve(&claims).await?;

        debug!(principal_id = principal.id, "Access token refresh requested");
        self.token_service.refresh_access_token(&principal).await
    }

    /// Ends the session of the token's principal; expired tokens are accepted
    pub async fn sign_out(&self, authorization_header: &str) -> DomainResult<()> {
        let token = Self::extract_bearer_token(authorization_header)?;
        let claims = self.token_service.get_authenticated_principal(token, true)?;
        let principal_id = claims.principal_id()?;

        self.token_service.delete_refresh_token(principal_id).await
    }

    pub fn token_service(&self) -> &Arc<TokenService<S>> {
        &self.token_service
    }

    async fn resolve(&self, claims: &Claims) -> Result<Principal, DomainError> {
        let principal_id = claims.principal_id()?;

        self.resolver
            .resolve(principal_id)
            .await?
            .ok_or_else(|| {
                warn!(principal_id, "Token subject no longer resolves to a principal");
                AuthError::PrincipalNotFound { principal_id }.into()
            })
    }
}
