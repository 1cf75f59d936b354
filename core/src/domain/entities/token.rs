//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Identity;

/// Claims signed into every access token
///
/// A closed record: the codec never reads or writes anything else. `exp` is kept
/// at second precision so that a decoded token compares equal to the claims it
/// was issued from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Subject (the user's email)
    pub sub: String,

    /// JWT ID, fresh for every issuance; pairs the token with its refresh token
    pub jti: Uuid,

    /// User email
    pub email: String,

    /// User store identifier
    pub user_id: String,

    /// Expiration timestamp
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl ClaimSet {
    /// Builds claims for `identity` issued at `issued_at`, expiring `lifetime` later
    ///
    /// The expiry is rounded up to the next whole second, so the token never
    /// lives shorter than `lifetime`.
    pub fn for_identity(identity: &Identity, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let exp = ceil_to_seconds(issued_at + lifetime);

        Self {
            sub: identity.email.clone(),
            jti: Uuid::new_v4(),
            email: identity.email.clone(),
            user_id: identity.id.clone(),
            exp,
        }
    }

    /// Whether the token is no longer valid at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// A signed, compact encoding of a [`ClaimSet`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(encoded: String) -> Self {
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Refresh token record persisted by the refresh token store
///
/// Created alongside every access token. `used` flips from `false` to `true`
/// exactly once, when the token is exchanged; `invalidated` is set by
/// out-of-band revocation. Records are never deleted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Opaque secret handed to the client
    pub token: String,

    /// `jti` of the access token issued together with this record
    pub jwt_id: Uuid,

    /// Owner of the token
    pub user_id: String,

    /// Timestamp when the token was created
    pub creation_date: DateTime<Utc>,

    /// Timestamp after which the token can no longer be exchanged
    pub expiry_date: DateTime<Utc>,

    /// Whether the token has already been exchanged
    pub used: bool,

    /// Whether the token has been revoked
    pub invalidated: bool,
}

impl RefreshToken {
    /// Creates a fresh, unused refresh token record
    pub fn new(
        token: String,
        jwt_id: Uuid,
        user_id: String,
        creation_date: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            token,
            jwt_id,
            user_id,
            creation_date,
            expiry_date: creation_date + lifetime,
            used: false,
            invalidated: false,
        }
    }

    /// Whether the token is past its expiry date at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry_date
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Access token and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: AccessToken,

    /// Claims embedded in `access_token`
    pub claims: ClaimSet,

    /// Stored refresh token record paired with `claims.jti`
    pub refresh_token: RefreshToken,
}

fn ceil_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    let seconds = if at.timestamp_subsec_nanos() == 0 {
        at.timestamp()
    } else {
        at.timestamp() + 1
    };
    Utc.timestamp_opt(seconds, 0).single().unwrap_or(at)
}
