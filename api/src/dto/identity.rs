//! Request and response bodies of the identity endpoints

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use tb_core::domain::value_objects::AuthResult;
use tb_shared::error_codes;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    pub email: String,
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "The Email field is required."))]
    pub email: String,
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// The expired access token
    #[validate(length(min = 1, message = "The Token field is required."))]
    pub token: String,
    #[validate(length(min = 1, message = "The RefreshToken field is required."))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSuccessResponse {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFailedResponse {
    pub errors: Vec<String>,
    pub error_code: String,
}

impl AuthFailedResponse {
    /// Flattens request validation failures into one message per violated rule
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let errors = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("The {} field is invalid.", field))
                })
            })
            .collect();

        Self {
            errors,
            error_code: error_codes::VALIDATION_ERROR.to_string(),
        }
    }
}

/// HTTP body for an identity outcome
pub enum AuthResponse {
    Success(AuthSuccessResponse),
    Failed(AuthFailedResponse),
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        match (result.success, result.token, result.refresh_token) {
            (true, Some(token), Some(refresh_token)) => AuthResponse::Success(AuthSuccessResponse {
                token,
                refresh_token,
            }),
            _ => AuthResponse::Failed(AuthFailedResponse {
                errors: result.errors,
                error_code: result
                    .error_code
                    .unwrap_or_else(|| error_codes::INTERNAL_ERROR.to_string()),
            }),
        }
    }
}
