//! Identity route handlers
//!
//! Refused requests answer 400 with an [`AuthFailedResponse`]; store outages and
//! timeouts answer 503.

use actix_web::{web, HttpResponse};
use std::future::Future;
use std::time::Duration;
use validator::Validate;

use tb_core::domain::value_objects::AuthResult;
use tb_core::errors::DomainError;
use tb_core::repositories::{RefreshTokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{AuthFailedResponse, AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};
use crate::handlers::error_handler::{handle_domain_error, request_timeout};
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/identity/register
///
/// # Request Body
///
/// ```json
/// { "email": "a@x.com", "password": "Secret123!" }
/// ```
///
/// # Response
///
/// - 200 OK: `{ "token": "eyJ...", "refresh_token": "..." }`
/// - 400 Bad Request: `{ "errors": ["..."], "error_code": "USER_ALREADY_EXISTS" }`
pub async fn register<R, U>(
    state: web::Data<AppState<R, U>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(AuthFailedResponse::from_validation(&errors));
    }

    with_timeout(
        state.request_timeout,
        state.gateway.register(&request.email, &request.password),
    )
    .await
}

/// Handler for POST /api/v1/identity/login
pub async fn login<R, U>(state: web::Data<AppState<R, U>>, request: web::Json<LoginRequest>) -> HttpResponse
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(AuthFailedResponse::from_validation(&errors));
    }

    with_timeout(
        state.request_timeout,
        state.gateway.login(&request.email, &request.password),
    )
    .await
}

/// Handler for POST /api/v1/identity/refresh
///
/// Takes the expired access token together with its refresh token. The
/// refresh token is spent on success and cannot be presented again.
///
/// # Request Body
///
/// ```json
/// { "token": "eyJ...", "refresh_token": "..." }
/// ```
pub async fn refresh<R, U>(state: web::Data<AppState<R, U>>, request: web::Json<RefreshRequest>) -> HttpResponse
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(AuthFailedResponse::from_validation(&errors));
    }

    with_timeout(
        state.request_timeout,
        state.gateway.refresh(&request.token, &request.refresh_token),
    )
    .await
}

/// Handler for POST /api/v1/identity/logout
///
/// Invalidates every refresh token of the authenticated user.
pub async fn logout<R, U>(state: web::Data<AppState<R, U>>, auth: AuthContext) -> HttpResponse
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    match tokio::time::timeout(state.request_timeout, state.gateway.revoke(&auth.user_id)).await {
        Ok(Ok(revoked)) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "revoked": revoked,
        })),
        Ok(Err(error)) => handle_domain_error(error),
        Err(_) => request_timeout(),
    }
}

/// Handler for GET /api/v1/identity/me
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "user_id": auth.user_id,
        "email": auth.email,
        "jti": auth.jti,
    }))
}

async fn with_timeout<F>(timeout: Duration, call: F) -> HttpResponse
where
    F: Future<Output = Result<AuthResult, DomainError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(result)) => match AuthResponse::from(result) {
            AuthResponse::Success(body) => HttpResponse::Ok().json(body),
            AuthResponse::Failed(body) => HttpResponse::BadRequest().json(body),
        },
        Ok(Err(error)) => handle_domain_error(error),
        Err(_) => request_timeout(),
    }
}
