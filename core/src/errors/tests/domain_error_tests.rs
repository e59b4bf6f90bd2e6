//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError};
use tg_shared::SettingsError;

#[test]
fn test_token_error_messages() {
    assert_eq!(TokenError::InvalidToken.to_string(), "Invalid token");
    assert_eq!(TokenError::ExpiredToken.to_string(), "Token expired");
    assert_eq!(
        TokenError::RefreshTokenNotFound.to_string(),
        "Refresh token not found"
    );
}

#[test]
fn test_token_error_is_transparent_in_domain_error() {
    let error: DomainError = TokenError::ExpiredToken.into();
    assert_eq!(error.to_string(), "Token expired");
    assert!(error.is_expired_token());
    assert!(!error.requires_sign_in());
}

#[test]
fn test_requires_sign_in() {
    let invalid: DomainError = TokenError::InvalidToken.into();
    let missing: DomainError = TokenError::RefreshTokenNotFound.into();
    let no_principal: DomainError = AuthError::PrincipalNotFound { principal_id: 9 }.into();
    let storage = DomainError::Storage {
        message: "connection refused".to_string(),
    };

    assert!(invalid.requires_sign_in());
    assert!(missing.requires_sign_in());
    assert!(no_principal.requires_sign_in());
    assert!(!storage.requires_sign_in());
    assert!(!storage.is_expired_token());
}

#[test]
fn test_auth_error_messages() {
    let error = AuthError::PrincipalNotFound { principal_id: 42 };
    assert_eq!(error.to_string(), "Principal not found: 42");
    assert_eq!(AuthError::MissingToken.to_string(), "Missing authentication token");
}

#[test]
fn test_settings_error_maps_to_config() {
    let error: DomainError = SettingsError::Invalid("bad lifetimes".to_string()).into();
    match error {
        DomainError::Config { message } => assert!(message.contains("bad lifetimes")),
        other => panic!("unexpected error: {:?}", other),
    }
}
