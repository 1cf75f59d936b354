//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Secret used when nothing is configured. Refused outside development.
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production-0123456789";

/// Minimum accepted length of the HMAC signing secret, in bytes (256 bits).
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted access token lifetime (30 days)
pub const MAX_ACCESS_TOKEN_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// Longest accepted refresh token lifetime (10 years)
pub const MAX_REFRESH_TOKEN_LIFETIME_DAYS: i64 = 10 * 365;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric key for signing access tokens
    pub secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_lifetime")]
    pub access_token_lifetime_secs: i64,

    /// Refresh token lifetime in days
    #[serde(default = "default_refresh_token_lifetime")]
    pub refresh_token_lifetime_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            access_token_lifetime_secs: default_access_token_lifetime(),
            refresh_token_lifetime_days: default_refresh_token_lifetime(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in seconds
    pub fn with_access_lifetime_secs(mut self, secs: i64) -> Self {
        self.access_token_lifetime_secs = secs;
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_lifetime_days(mut self, days: i64) -> Self {
        self.refresh_token_lifetime_days = days;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }

    /// Checks the values that cannot be safely defaulted at runtime
    pub fn validate(&self) -> Result<(), String> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(format!(
                "auth.jwt.secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                self.secret.len()
            ));
        }
        if !(1..=MAX_ACCESS_TOKEN_LIFETIME_SECS).contains(&self.access_token_lifetime_secs) {
            return Err(format!(
                "auth.jwt.access_token_lifetime_secs must be between 1 and {}",
                MAX_ACCESS_TOKEN_LIFETIME_SECS
            ));
        }
        if !(1..=MAX_REFRESH_TOKEN_LIFETIME_DAYS).contains(&self.refresh_token_lifetime_days) {
            return Err(format!(
                "auth.jwt.refresh_token_lifetime_days must be between 1 and {}",
                MAX_REFRESH_TOKEN_LIFETIME_DAYS
            ));
        }
        Ok(())
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,
}

fn default_access_token_lifetime() -> i64 {
    2 * 60 * 60 // 2 hours
}

fn default_refresh_token_lifetime() -> i64 {
    180 // ~6 months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_lifetime_secs, 7200);
        assert_eq!(config.refresh_token_lifetime_days, 180);
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("a-much-longer-secret-than-thirty-two-bytes")
            .with_access_lifetime_secs(300)
            .with_refresh_lifetime_days(14);

        assert_eq!(config.access_token_lifetime_secs, 300);
        assert_eq!(config.refresh_token_lifetime_days, 14);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = JwtConfig::new("too-short");
        assert!(config.validate().unwrap_err().contains("at least 32 bytes"));
    }

    #[test]
    fn test_non_positive_lifetimes_rejected() {
        let secret = "x".repeat(MIN_SECRET_BYTES);
        assert!(JwtConfig::new(secret.clone()).with_access_lifetime_secs(0).validate().is_err());
        assert!(JwtConfig::new(secret).with_refresh_lifetime_days(-1).validate().is_err());
    }

    #[test]
    fn test_oversized_lifetimes_rejected() {
        let secret = "x".repeat(40);

        let refresh = JwtConfig::new(secret.clone()).with_refresh_lifetime_days(1_000_000_000);
        assert!(refresh.validate().unwrap_err().contains("refresh_token_lifetime_days"));

        let access = JwtConfig::new(secret.clone()).with_access_lifetime_secs(i64::MAX);
        assert!(access.validate().unwrap_err().contains("access_token_lifetime_secs"));

        let longest = JwtConfig::new(secret)
            .with_access_lifetime_secs(MAX_ACCESS_TOKEN_LIFETIME_SECS)
            .with_refresh_lifetime_days(MAX_REFRESH_TOKEN_LIFETIME_DAYS);
        assert!(longest.validate().is_ok());
    }
}
