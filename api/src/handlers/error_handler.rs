//! Mapping of errors to HTTP responses

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};

use tb_core::errors::{DomainError, TokenError};
use tb_shared::{error_codes, ErrorResponse};

use crate::dto::AuthFailedResponse;

/// Converts a domain error into an HTTP response
///
/// Store outages become 503 so clients retry instead of re-authenticating.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Infrastructure { message } => {
            tracing::error!(%message, "Store unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::INFRASTRUCTURE_ERROR,
                "The service is temporarily unavailable",
            ))
        }
        DomainError::Auth(error) => HttpResponse::BadRequest().json(AuthFailedResponse {
            errors: error.messages(),
            error_code: error.code().to_string(),
        }),
        DomainError::Token(TokenError::EncodingFailed) | DomainError::Internal { .. } => {
            tracing::error!(error = %error, "Internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
        DomainError::Token(error) => {
            HttpResponse::Unauthorized().json(ErrorResponse::new(error.code(), error.to_string()))
        }
    }
}

/// Response for a request whose gateway call exceeded the configured timeout
pub fn request_timeout() -> HttpResponse {
    tracing::warn!("Identity request timed out");
    HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
        error_codes::REQUEST_TIMEOUT,
        "The request timed out",
    ))
}

/// Rejects unreadable JSON bodies with the identity failure shape
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = error.to_string();
    let response = HttpResponse::BadRequest().json(AuthFailedResponse {
        errors: vec![message],
        error_code: error_codes::VALIDATION_ERROR.to_string(),
    });
    actix_web::error::InternalError::from_response(error, response).into()
}
