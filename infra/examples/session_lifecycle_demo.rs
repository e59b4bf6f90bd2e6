//! Example: sign-in, authenticated request, refresh and sign-out
//!
//! Uses the in-memory cache unless `CACHE_TYPE=redis` is set.
//!
//! Run with: cargo run --example session_lifecycle_demo -p tg_infra

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tg_core::domain::entities::principal::{Principal, Role};
use tg_core::errors::DomainError;
use tg_core::services::auth::{AuthenticationService, PrincipalResolver};
use tg_core::services::token::{TokenService, TokenServiceConfig};
use tg_infra::{create_session_store, init_tracing};
use tg_shared::AppConfig;

/// Fixed directory of principals standing in for a user database
struct StaticDirectory {
    principals: HashMap<i64, Principal>,
}

#[async_trait]
impl PrincipalResolver for StaticDirectory {
    async fn resolve(&self, principal_id: i64) -> Result<Option<Principal>, DomainError> {
        Ok(self.principals.get(&principal_id).cloned())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = AppConfig::from_env();
    if config.auth.jwt.is_using_default_secret() {
        config.auth.jwt.secret = "demo-secret-0123456789abcdef0123456789".to_string();
    }
    config.validate().context("invalid configuration")?;

    let _ = init_tracing(&config.logging);

    let store = create_session_store(&config.cache)
        .await
        .context("failed to create session store")?;
    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)?;
    let token_service = Arc::new(TokenService::new(store, token_config)?);

    let alice = Principal::new(1, "alice@example.com", "Alice", Role::Admin);
    let directory = StaticDirectory {
        principals: HashMap::from([(alice.id, alice.clone())]),
    };
    let auth = AuthenticationService::new(Arc::clone(&token_service), directory);

    println!("=== Sign in ===");
    let access = token_service.create_full_tokens(&alice).await?;
    println!("Access token issued ({} chars)", access.len());

    println!("\n=== Authenticated request ===");
    let header = format!("Bearer {}", access);
    let context = auth.authenticate(&header).await?;
    println!(
        "Authenticated principal {} ({}), admin: {}",
        context.principal.id,
        context.principal.email,
        context.is_admin()
    );

    println!("\n=== Refresh with an expired access token ===");
    let expired = token_service.codec().issue(&alice, -1)?;
    match auth.authenticate(&format!("Bearer {}", expired)).await {
        Err(e) if e.is_expired_token() => println!("Expired token rejected: {}", e),
        other => println!("Unexpected result: {:?}", other.map(|c| c.principal.id)),
    }
    let refreshed = auth.refresh(&format!("Bearer {}", expired)).await?;
    println!("New access token issued ({} chars)", refreshed.len());

    println!("\n=== Sign out ===");
    auth.sign_out(&format!("Bearer {}", refreshed)).await?;
    match auth.refresh(&format!("Bearer {}", refreshed)).await {
        Err(e) => println!("Refresh after sign-out fails: {}", e),
        Ok(_) => println!("Unexpected refresh after sign-out"),
    }

    Ok(())
}
