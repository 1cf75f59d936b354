//! Issues access token / refresh token pairs

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{ClaimSet, RefreshToken, TokenPair};
use crate::errors::DomainError;
use crate::repositories::RefreshTokenRepository;

use super::codec::ClaimsCodec;
use super::config::TokenServiceConfig;

/// Number of characters in a refresh token value
pub const REFRESH_TOKEN_LENGTH: usize = 64;

/// Mints token pairs and persists the refresh half
///
/// This is the only place refresh token records are created.
pub struct TokenIssuer<R: RefreshTokenRepository> {
    codec: ClaimsCodec,
    repository: Arc<R>,
    config: TokenServiceConfig,
}

impl<R: RefreshTokenRepository> TokenIssuer<R> {
    /// Creates a new token issuer
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token store
    /// * `config` - Signing secret and token lifetimes
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        Self {
            codec: ClaimsCodec::new(config.secret.as_bytes()),
            repository,
            config,
        }
    }

    /// Codec sharing this issuer's signing key
    pub fn codec(&self) -> &ClaimsCodec {
        &self.codec
    }

    /// Refresh token store this issuer writes to
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a fresh access token and a paired, stored refresh token
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Signed access token, its claims and the stored record
    /// * `Err(DomainError::Internal { .. })` - A configured lifetime overflows the expiry date
    /// * `Err(DomainError)` - The refresh token could not be stored
    pub async fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, DomainError> {
        let now = Utc::now();
        for lifetime in [self.config.access_token_lifetime, self.config.refresh_token_lifetime] {
            if now.checked_add_signed(lifetime).is_none() {
                return Err(DomainError::Internal {
                    message: format!("token lifetime {} overflows the expiry date", lifetime),
                });
            }
        }

        let claims = ClaimSet::for_identity(identity, now, self.config.access_token_lifetime);

        let access_token = self.codec.issue(&claims).map_err(|e| DomainError::Internal {
            message: format!("failed to sign access token: {}", e),
        })?;

        let record = RefreshToken::new(
            generate_refresh_token_value(),
            claims.jti,
            identity.id.clone(),
            now,
            self.config.refresh_token_lifetime,
        );
        let refresh_token = self.repository.insert(record).await?;

        tracing::debug!(user_id = %identity.id, jti = %claims.jti, "Issued token pair");

        Ok(TokenPair {
            access_token,
            claims,
            refresh_token,
        })
    }
}

/// Random opaque refresh token value
pub(crate) fn generate_refresh_token_value() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
