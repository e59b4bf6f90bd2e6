//! Integration tests for the public token and authentication API
//!
//! Uses a minimal in-process `SessionStore` so the flow runs without any
//! cache backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tg_core::errors::{AuthError, DomainError, TokenError};
use tg_core::{
    AuthenticationService, Principal, PrincipalResolver, Role, SessionStore, TokenService,
    TokenServiceConfig,
};

#[derive(Default)]
struct InMemorySessions {
    tokens: Mutex<HashMap<i64, String>>,
}

#[async_trait]
impl SessionStore for InMemorySessions {
    async fn put(&self, principal_id: i64, token: &str, _ttl_seconds: u64) -> Result<(), DomainError> {
        self.tokens.lock().await.insert(principal_id, token.to_string());
        Ok(())
    }

    async fn get(&self, principal_id: i64) -> Result<Option<String>, DomainError> {
        Ok(self.tokens.lock().await.get(&principal_id).cloned())
    }

    async fn delete(&self, principal_id: i64) -> Result<(), DomainError> {
        self.tokens.lock().await.remove(&principal_id);
        Ok(())
    }
}

struct Directory(Vec<Principal>);

#[async_trait]
impl PrincipalResolver for Directory {
    async fn resolve(&self, principal_id: i64) -> Result<Option<Principal>, DomainError> {
        Ok(self.0.iter().find(|p| p.id == principal_id).cloned())
    }
}

fn token_service() -> Arc<TokenService<InMemorySessions>> {
    let config = TokenServiceConfig {
        jwt_secret: "core-integration-secret-0123456789ab".to_string(),
        access_token_expiry_seconds: 900,
        refresh_token_expiry_seconds: 3600,
        ..Default::default()
    };
    Arc::new(TokenService::new(InMemorySessions::default(), config).unwrap())
}

#[tokio::test]
async fn test_request_authentication_flow() {
    let admin = Principal::new(10, "admin@example.com", "Admin", Role::Admin);
    let tokens = token_service();
    let auth = AuthenticationService::new(Arc::clone(&tokens), Directory(vec![admin.clone()]));

    let access = tokens.create_full_tokens(&admin).await.unwrap();
    let context = auth.authenticate(&format!("Bearer {}", access)).await.unwrap();
    assert!(context.is_admin());
    assert_eq!(context.principal, admin);

    auth.sign_out(&format!("Bearer {}", access)).await.unwrap();
    let err = auth.refresh(&format!("Bearer {}", access)).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::RefreshTokenNotFound)));
}

#[tokio::test]
async fn test_removed_principal_cannot_authenticate() {
    let ghost = Principal::new(11, "ghost@example.com", "Ghost", Role::User);
    let tokens = token_service();
    let auth = AuthenticationService::new(Arc::clone(&tokens), Directory(Vec::new()));

    let access = tokens.create_access_token(&ghost).unwrap();
    let err = auth.authenticate(&format!("Bearer {}", access)).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::Auth(AuthError::PrincipalNotFound { principal_id: 11 })
    ));
}

#[tokio::test]
async fn test_tokens_from_another_deployment_are_rejected() {
    let principal = Principal::new(12, "p@example.com", "P", Role::User);
    let ours = token_service();
    let theirs = TokenService::new(
        InMemorySessions::default(),
        TokenServiceConfig {
            jwt_secret: "another-deployment-secret-abcdefghij".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    let foreign = theirs.create_access_token(&principal).unwrap();
    let err = ours.get_authenticated_principal(&foreign, true).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}
