//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_auth_error_codes_are_distinct() {
    let all = vec![
        AuthError::Validation { messages: vec![] },
        AuthError::UserAlreadyExists,
        AuthError::InvalidCredentials,
        AuthError::InvalidToken,
        AuthError::TokenNotYetExpired,
        AuthError::RefreshTokenNotFound,
        AuthError::RefreshTokenExpired,
        AuthError::RefreshTokenInvalidated,
        AuthError::RefreshTokenAlreadyUsed,
        AuthError::TokenMismatch,
        AuthError::UserNotFound,
    ];

    let mut codes: Vec<&str> = all.iter().map(|e| e.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), all.len());
}

#[test]
fn test_validation_keeps_every_message() {
    let error = AuthError::Validation {
        messages: vec![
            "Passwords must be at least 6 characters.".to_string(),
            "Passwords must have at least one digit ('0'-'9').".to_string(),
        ],
    };

    assert_eq!(error.messages().len(), 2);
    assert_eq!(error.code(), "VALIDATION_ERROR");
}

#[test]
fn test_refresh_messages() {
    assert_eq!(
        AuthError::RefreshTokenAlreadyUsed.messages(),
        vec!["This refresh token has been used.".to_string()]
    );
    assert_eq!(
        AuthError::TokenMismatch.to_string(),
        "This refresh token does not match this JWT."
    );
}

#[test]
fn test_domain_error_bridges() {
    let error: DomainError = AuthError::TokenNotYetExpired.into();
    assert_eq!(error.code(), "TOKEN_NOT_YET_EXPIRED");
    assert!(!error.is_retryable());

    let error: DomainError = TokenError::InvalidSignature.into();
    assert_eq!(error.code(), "INVALID_TOKEN");
}

#[test]
fn test_infrastructure_is_retryable() {
    let error = DomainError::infrastructure("connection refused");
    assert_eq!(error.code(), "INFRASTRUCTURE_ERROR");
    assert!(error.is_retryable());
    assert_eq!(error.to_string(), "Infrastructure error: connection refused");
}
