//! Exchange of an expired access token and its refresh token for a new pair

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::token::TokenPair;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{RefreshTokenRepository, UserRepository};
use crate::services::token::TokenIssuer;

/// Runs the refresh protocol
///
/// Checks run in a fixed order and the first failing one decides the error. The
/// only write before success is the compare-and-set on the refresh token's
/// `used` flag, so a lost race or a later failure never yields a second pair
/// from the same refresh token.
pub struct RefreshCoordinator<R: RefreshTokenRepository, U: UserRepository> {
    issuer: Arc<TokenIssuer<R>>,
    users: Arc<U>,
}

impl<R: RefreshTokenRepository, U: UserRepository> RefreshCoordinator<R, U> {
    pub fn new(issuer: Arc<TokenIssuer<R>>, users: Arc<U>) -> Self {
        Self { issuer, users }
    }

    /// Exchanges `access_token` and `refresh_token` for a new pair
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Freshly issued pair; `refresh_token` is now spent
    /// * `Err(DomainError::Auth(_))` - The exchange was refused
    /// * `Err(DomainError::Infrastructure { .. })` - A store failed
    pub async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let now = Utc::now();

        let claims = self
            .issuer
            .codec()
            .decode_ignoring_expiry(access_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh rejected: undecodable access token");
                AuthError::InvalidToken
            })?;

        if !claims.is_expired_at(now) {
            return Err(AuthError::TokenNotYetExpired.into());
        }

        let stored = self
            .issuer
            .repository()
            .find_by_token(refresh_token)
            .await?
            .ok_or(AuthError::RefreshTokenNotFound)?;

        if stored.is_expired_at(now) {
            return Err(AuthError::RefreshTokenExpired.into());
        }
        if stored.invalidated {
            return Err(AuthError::RefreshTokenInvalidated.into());
        }
        if stored.used {
            return Err(AuthError::RefreshTokenAlreadyUsed.into());
        }
        if stored.jwt_id != claims.jti {
            tracing::warn!(user_id = %claims.user_id, jti = %claims.jti, "Refresh token presented with a foreign access token");
            return Err(AuthError::TokenMismatch.into());
        }

        if !self.issuer.repository().mark_used(refresh_token).await? {
            tracing::info!(user_id = %claims.user_id, jti = %claims.jti, "Lost refresh race");
            return Err(AuthError::RefreshTokenAlreadyUsed.into());
        }

        let identity = self
            .users
            .find_by_id(&claims.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let pair = self.issuer.issue_pair(&identity).await?;
        tracing::info!(user_id = %identity.id, old_jti = %claims.jti, jti = %pair.claims.jti, "Refreshed token pair");

        Ok(pair)
    }
}
