//! Unit tests for token claims

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::principal::{Principal, Role};
use crate::domain::entities::token::{Claims, JWT_ISSUER};
use crate::errors::TokenError;

fn principal() -> Principal {
    Principal::new(1, "a@b.com", "Alice", Role::User)
}

#[test]
fn test_claims_from_principal() {
    let claims = Claims::for_principal(&principal(), 3600, JWT_ISSUER).unwrap();

    assert_eq!(claims.sub, "1");
    assert_eq!(claims.email, "a@b.com");
    assert_eq!(claims.role, "USER");
    assert_eq!(claims.iss, JWT_ISSUER);
    assert_eq!(claims.exp - claims.iat, 3600);
    assert!(!claims.is_expired());
}

#[test]
fn test_claims_issued_at_fixed_clock() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let claims = Claims::issued_at(&principal(), 86400, "issuer", now).unwrap();

    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.exp, (now + Duration::days(1)).timestamp());
    assert_eq!(claims.expires_at(), Some(now + Duration::days(1)));
}

#[test]
fn test_negative_lifetime_is_already_expired() {
    let claims = Claims::for_principal(&principal(), -1, JWT_ISSUER).unwrap();
    assert!(claims.is_expired());
}

#[test]
fn test_expiry_boundary_is_inclusive() {
    let claims = Claims::for_principal(&principal(), 10, JWT_ISSUER).unwrap();

    assert!(!claims.is_expired_at(claims.exp - 1));
    assert!(claims.is_expired_at(claims.exp));
    assert!(claims.is_expired_at(claims.exp + 1));
}

#[test]
fn test_each_claims_gets_unique_jti() {
    let first = Claims::for_principal(&principal(), 60, JWT_ISSUER).unwrap();
    let second = Claims::for_principal(&principal(), 60, JWT_ISSUER).unwrap();
    assert_ne!(first.jti, second.jti);
}

#[test]
fn test_principal_id_and_role_parsing() {
    let admin = Principal::new(77, "root@b.com", "Root", Role::Admin);
    let claims = Claims::for_principal(&admin, 60, JWT_ISSUER).unwrap();

    assert_eq!(claims.principal_id(), Ok(77));
    assert_eq!(claims.role(), Ok(Role::Admin));
}

#[test]
fn test_malformed_subject_and_role() {
    let mut claims = Claims::for_principal(&principal(), 60, JWT_ISSUER).unwrap();
    claims.sub = "not-a-number".to_string();
    claims.role = "SUPERUSER".to_string();

    assert_eq!(claims.principal_id(), Err(TokenError::InvalidToken));
    assert_eq!(claims.role(), Err(TokenError::InvalidToken));
}

#[test]
fn test_out_of_range_lifetime_fails() {
    for lifetime in [i64::MAX, i64::MAX / 2, i64::MIN] {
        assert_eq!(
            Claims::for_principal(&principal(), lifetime, JWT_ISSUER),
            Err(TokenError::TokenGenerationFailed)
        );
    }
}
