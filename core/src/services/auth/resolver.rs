//! Lookup of the authoritative principal behind a token subject

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::principal::Principal;
use crate::errors::DomainError;

/// Resolves principal ids to current identity snapshots
///
/// Implemented by the surrounding application on top of its user storage.
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    /// Returns `None` when the principal no longer exists
    async fn resolve(&self, principal_id: i64) -> Result<Option<Principal>, DomainError>;
}

#[async_trait]
impl<T: PrincipalResolver + ?Sized> PrincipalResolver for Arc<T> {
    async fn resolve(&self, principal_id: i64) -> Result<Option<Principal>, DomainError> {
        (**self).resolve(principal_id).await
    }
}
