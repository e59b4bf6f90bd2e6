//! Contract tests for the mock session store

use std::sync::Arc;

use crate::errors::DomainError;
use crate::repositories::session::{MockSessionStore, SessionStore};

#[tokio::test]
async fn test_put_then_get() {
    let store = MockSessionStore::new();
    store.put(1, "token-a", 60).await.unwrap();

    assert_eq!(store.get(1).await.unwrap(), Some("token-a".to_string()));
    assert_eq!(store.get(2).await.unwrap(), None);
}

#[tokio::test]
async fn test_put_overwrites() {
    let store = MockSessionStore::new();
    store.put(1, "token-a", 60).await.unwrap();
    store.put(1, "token-b", 60).await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get(1).await.unwrap(), Some("token-b".to_string()));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = MockSessionStore::new();
    store.put(1, "token-a", 60).await.unwrap();

    store.delete(1).await.unwrap();
    store.delete(1).await.unwrap();
    assert_eq!(store.get(1).await.unwrap(), None);
}

#[tokio::test]
async fn test_expired_entry_reads_as_absent() {
    let store = MockSessionStore::new();
    store.put(1, "token-a", 0).await.unwrap();

    assert_eq!(store.get(1).await.unwrap(), None);
    assert!(store.record(1).await.is_some());
}

#[tokio::test]
async fn test_failure_surfaces_as_storage_error() {
    let store = MockSessionStore::new();
    store.set_should_fail(true);

    assert!(matches!(
        store.put(1, "token-a", 60).await,
        Err(DomainError::Storage { .. })
    ));
    assert!(matches!(store.get(1).await, Err(DomainError::Storage { .. })));
    assert!(matches!(store.delete(1).await, Err(DomainError::Storage { .. })));
}

#[tokio::test]
async fn test_arc_forwarding() {
    let store = Arc::new(MockSessionStore::new());
    let shared: Arc<dyn SessionStore> = store.clone();

    shared.put(5, "token-a", 60).await.unwrap();
    assert_eq!(store.get(5).await.unwrap(), Some("token-a".to_string()));
}
