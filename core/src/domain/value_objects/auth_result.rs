//! Uniform result of the register, login and refresh operations.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::errors::AuthError;

/// Outcome of an identity operation
///
/// On success `token` and `refresh_token` are set and `errors` is empty. On failure
/// both tokens are absent, `errors` carries human-readable messages and
/// `error_code` the stable identifier of the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default)]
    pub errors: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl AuthResult {
    /// Successful result carrying a freshly issued pair
    pub fn success(pair: &TokenPair) -> Self {
        Self {
            success: true,
            token: Some(pair.access_token.as_str().to_string()),
            refresh_token: Some(pair.refresh_token.token.clone()),
            errors: Vec::new(),
            error_code: None,
        }
    }

    /// Failed result for a taxonomy error
    pub fn failure(error: &AuthError) -> Self {
        Self {
            success: false,
            token: None,
            refresh_token: None,
            errors: error.messages(),
            error_code: Some(error.code().to_string()),
        }
    }

    /// Whether this is a failure with the given error code
    pub fn failed_with(&self, code: &str) -> bool {
        !self.success && self.error_code.as_deref() == Some(code)
    }
}
