//! Identity facade: register, login, refresh and revoke

use std::sync::Arc;

use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::AuthResult;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{RefreshTokenRepository, UserRepository};
use crate::services::refresh::RefreshCoordinator;
use crate::services::token::{ClaimsCodec, TokenIssuer, TokenServiceConfig};

/// Entry point for identity operations
///
/// Every refused request comes back as `Ok` with a failed [`AuthResult`]. `Err` is
/// reserved for failures of the stores themselves, which the caller should
/// treat as "try again later" rather than as an authentication verdict.
pub struct AuthGateway<R: RefreshTokenRepository, U: UserRepository> {
    users: Arc<U>,
    issuer: Arc<TokenIssuer<R>>,
    coordinator: RefreshCoordinator<R, U>,
}

impl<R: RefreshTokenRepository, U: UserRepository> AuthGateway<R, U> {
    /// Wires the gateway over a user store and a refresh token store
    pub fn new(users: Arc<U>, tokens: Arc<R>, config: TokenServiceConfig) -> Self {
        let issuer = Arc::new(TokenIssuer::new(tokens, config));
        let coordinator = RefreshCoordinator::new(Arc::clone(&issuer), Arc::clone(&users));
        Self {
            users,
            issuer,
            coordinator,
        }
    }

    /// Codec for verifying access tokens on ordinary requests
    pub fn codec(&self) -> &ClaimsCodec {
        self.issuer.codec()
    }

    /// Creates an account and signs the new user in
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResult, DomainError> {
        settle(self.register_pair(email, password).await)
    }

    /// Signs an existing user in
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, DomainError> {
        settle(self.login_pair(email, password).await)
    }

    /// Exchanges an expired access token and its refresh token for a new pair
    pub async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<AuthResult, DomainError> {
        settle(self.coordinator.refresh(access_token, refresh_token).await)
    }

    /// Invalidates every outstanding refresh token of `user_id`
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of refresh tokens newly invalidated
    pub async fn revoke(&self, user_id: &str) -> Result<usize, DomainError> {
        let count = self.issuer.repository().invalidate_all_for_user(user_id).await?;
        tracing::info!(user_id = %user_id, count, "Revoked refresh tokens");
        Ok(count)
    }

    async fn register_pair(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let identity = self.users.create_user(email, password).await?;
        tracing::info!(user_id = %identity.id, "User registered");

        self.issuer.issue_pair(&identity).await
    }

    async fn login_pair(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let identity = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.users.check_password(&identity, password).await? {
            tracing::info!(user_id = %identity.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.issuer.issue_pair(&identity).await
    }
}

fn settle(outcome: Result<TokenPair, DomainError>) -> Result<AuthResult, DomainError> {
    match outcome {
        Ok(pair) => Ok(AuthResult::success(&pair)),
        Err(DomainError::Auth(error)) => {
            tracing::debug!(code = error.code(), "Identity request refused");
            Ok(AuthResult::failure(&error))
        }
        Err(other) => {
            tracing::error!(error = %other, "Identity request failed");
            Err(other)
        }
    }
}
