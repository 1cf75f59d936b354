//! Configuration for token issuance

use chrono::Duration;
use tb_shared::config::auth::DEVELOPMENT_SECRET;
use tb_shared::{ConfigError, JwtConfig};

/// Configuration for the token issuer
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub secret: String,
    /// Lifetime of access tokens
    pub access_token_lifetime: Duration,
    /// Lifetime of refresh tokens
    pub refresh_token_lifetime: Duration,
}

impl TokenServiceConfig {
    /// Builds the issuer configuration from the loaded application settings
    ///
    /// Out-of-range lifetimes are refused here rather than at issuance.
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, ConfigError> {
        jwt.validate().map_err(ConfigError::Invalid)?;

        Ok(Self {
            secret: jwt.secret.clone(),
            access_token_lifetime: Duration::seconds(jwt.access_token_lifetime_secs),
            refresh_token_lifetime: Duration::days(jwt.refresh_token_lifetime_days),
        })
    }

    /// Override the access token lifetime
    pub fn with_access_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_token_lifetime = lifetime;
        self
    }

    /// Override the refresh token lifetime
    pub fn with_refresh_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.refresh_token_lifetime = lifetime;
        self
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: DEVELOPMENT_SECRET.to_string(),
            access_token_lifetime: Duration::hours(2),
            refresh_token_lifetime: Duration::days(180),
        }
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("secret", &"<redacted>")
            .field("access_token_lifetime", &self.access_token_lifetime)
            .field("refresh_token_lifetime", &self.refresh_token_lifetime)
            .finish()
    }
}
