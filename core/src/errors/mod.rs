//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError};

use tb_shared::error_codes;
use thiserror::Error;

/// Core domain errors
///
/// `Auth` is the recoverable taxonomy shown to clients. `Infrastructure` means a
/// collaborator (store, network) failed and the whole request may be retried later;
/// it is never folded into `Auth`.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for storage/collaborator failures
    pub fn infrastructure(message: impl Into<String>) -> Self {
        DomainError::Infrastructure {
            message: message.into(),
        }
    }

    /// Stable machine-readable identifier for this failure
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Infrastructure { .. } => error_codes::INFRASTRUCTURE_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(e) => e.code(),
            DomainError::Token(e) => e.code(),
        }
    }

    /// Whether the caller should retry the request later rather than re-authenticate
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Infrastructure { .. })
    }
}
