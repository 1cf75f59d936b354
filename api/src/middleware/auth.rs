//! Bearer token middleware for protecting API endpoints.
//!
//! Extracts the access token from the `Authorization` header, verifies it
//! (signature, pinned algorithm and expiry) and injects an [`AuthContext`]
//! into the request.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use tb_core::domain::entities::token::ClaimSet;
use tb_core::services::ClaimsCodec;
use tb_shared::{error_codes, ErrorResponse};

/// Caller identity injected into authenticated requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    /// ID of the access token that authenticated the request
    pub jti: Uuid,
}

impl From<ClaimSet> for AuthContext {
    fn from(claims: ClaimSet) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            jti: claims.jti,
        }
    }
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    codec: Rc<ClaimsCodec>,
}

impl JwtAuth {
    pub fn new(codec: ClaimsCodec) -> Self {
        Self {
            codec: Rc::new(codec),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            codec: Rc::clone(&self.codec),
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    codec: Rc<ClaimsCodec>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let codec = Rc::clone(&self.codec);

        Box::pin(async move {
            let token = extract_bearer_token(&req)
                .ok_or_else(|| unauthorized(error_codes::UNAUTHORIZED, "Missing or invalid Authorization header"))?;

            let claims = codec.decode_and_check_expiry(&token).map_err(|e| {
                tracing::debug!(error = %e, "Bearer token rejected");
                unauthorized(e.code(), &e.to_string())
            })?;

            req.extensions_mut().insert(AuthContext::from(claims));

            service.call(req).await
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn unauthorized(code: &str, message: &str) -> Error {
    let response = HttpResponse::Unauthorized().json(ErrorResponse::new(code, message));
    InternalError::from_response(message.to_string(), response).into()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized(error_codes::UNAUTHORIZED, "Authentication required"));

        ready(result)
    }
}
