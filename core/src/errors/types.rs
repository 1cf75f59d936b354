//! Domain-specific error types for authentication and token handling
//!
//! `AuthError` is the closed taxonomy surfaced to callers through `AuthResult`.
//! Each variant carries a stable identifier (see [`AuthError::code`]) so clients
//! can branch without parsing messages. `TokenError` covers the claims codec.

use tb_shared::error_codes;
use thiserror::Error;

/// Authentication failures reported back to the caller as a failed `AuthResult`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{}", .messages.join(" "))]
    Validation { messages: Vec<String> },

    #[error("User with this email already exists.")]
    UserAlreadyExists,

    #[error("Email/password combination is invalid.")]
    InvalidCredentials,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("This token hasn't expired yet.")]
    TokenNotYetExpired,

    #[error("This refresh token does not exist.")]
    RefreshTokenNotFound,

    #[error("This refresh token has expired.")]
    RefreshTokenExpired,

    #[error("This refresh token has been invalidated.")]
    RefreshTokenInvalidated,

    #[error("This refresh token has been used.")]
    RefreshTokenAlreadyUsed,

    #[error("This refresh token does not match this JWT.")]
    TokenMismatch,

    #[error("User not found.")]
    UserNotFound,
}

impl AuthError {
    /// Stable machine-readable identifier for this failure
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation { .. } => error_codes::VALIDATION_ERROR,
            AuthError::UserAlreadyExists => error_codes::USER_ALREADY_EXISTS,
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::InvalidToken => error_codes::INVALID_TOKEN,
            AuthError::TokenNotYetExpired => error_codes::TOKEN_NOT_YET_EXPIRED,
            AuthError::RefreshTokenNotFound => error_codes::REFRESH_TOKEN_NOT_FOUND,
            AuthError::RefreshTokenExpired => error_codes::REFRESH_TOKEN_EXPIRED,
            AuthError::RefreshTokenInvalidated => error_codes::REFRESH_TOKEN_INVALIDATED,
            AuthError::RefreshTokenAlreadyUsed => error_codes::REFRESH_TOKEN_ALREADY_USED,
            AuthError::TokenMismatch => error_codes::TOKEN_MISMATCH,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
        }
    }

    /// Human-readable messages; validation failures keep one entry per rule
    pub fn messages(&self) -> Vec<String> {
        match self {
            AuthError::Validation { messages } => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<tb_shared::validation::ValidationErrors> for AuthError {
    fn from(errors: tb_shared::validation::ValidationErrors) -> Self {
        AuthError::Validation {
            messages: errors.messages(),
        }
    }
}

/// Claims codec failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Signing algorithm mismatch")]
    AlgorithmMismatch,

    #[error("Token expired")]
    Expired,

    #[error("Token encoding failed")]
    EncodingFailed,
}

impl TokenError {
    /// Stable machine-readable identifier for this failure
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::EncodingFailed => error_codes::INTERNAL_ERROR,
            TokenError::Malformed | TokenError::InvalidSignature | TokenError::AlgorithmMismatch => {
                error_codes::INVALID_TOKEN
            }
        }
    }
}
