use chrono::Utc;

use crate::domain::entities::session::{SessionRecord, SESSION_KEY_PREFIX};

#[test]
fn test_session_key_format() {
    assert_eq!(SessionRecord::key_for(42), "Session_42");
    assert!(SessionRecord::key_for(-3).starts_with(SESSION_KEY_PREFIX));
}

#[test]
fn test_record_expiry_follows_ttl() {
    let record = SessionRecord::new(7, "token".to_string(), 86400);

    assert_eq!(record.key(), "Session_7");
    assert!(!record.is_expired());
    let remaining = (record.expires_at - Utc::now()).num_seconds();
    assert!((86398..=86400).contains(&remaining));
}

#[test]
fn test_zero_ttl_record_is_expired() {
    let record = SessionRecord::new(7, "token".to_string(), 0);
    assert!(record.is_expired());
}
