//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error response structure used by non-identity endpoints
/// (middleware rejections, timeouts, unavailable stores)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Stable error identifiers. Clients branch on these, never on messages.
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const USER_ALREADY_EXISTS: &str = "USER_ALREADY_EXISTS";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_NOT_YET_EXPIRED: &str = "TOKEN_NOT_YET_EXPIRED";
    pub const REFRESH_TOKEN_NOT_FOUND: &str = "REFRESH_TOKEN_NOT_FOUND";
    pub const REFRESH_TOKEN_EXPIRED: &str = "REFRESH_TOKEN_EXPIRED";
    pub const REFRESH_TOKEN_INVALIDATED: &str = "REFRESH_TOKEN_INVALIDATED";
    pub const REFRESH_TOKEN_ALREADY_USED: &str = "REFRESH_TOKEN_ALREADY_USED";
    pub const TOKEN_MISMATCH: &str = "TOKEN_MISMATCH";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
    pub const INFRASTRUCTURE_ERROR: &str = "INFRASTRUCTURE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
