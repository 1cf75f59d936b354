//! Access token codec

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{AccessToken, ClaimSet};
use crate::errors::TokenError;

/// The only algorithm tokens are signed and verified with.
///
/// The verifier is chosen here, never from the token header, so a token that
/// names another algorithm (or `none`) is rejected before any signature check.
pub const PINNED_ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs claim sets into access tokens and verifies them back
///
/// Expiry is never enforced by the underlying JWT library; callers pick the
/// decode method that matches their use. The refresh flow must read expired
/// tokens, ordinary authentication must reject them.
#[derive(Clone)]
pub struct ClaimsCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl ClaimsCodec {
    /// Creates a codec over a symmetric signing secret
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(PINNED_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signs `claims` into a compact access token
    ///
    /// # Returns
    ///
    /// * `Ok(AccessToken)` - The signed token
    /// * `Err(TokenError::EncodingFailed)` - Claims could not be serialized
    pub fn issue(&self, claims: &ClaimSet) -> Result<AccessToken, TokenError> {
        encode(&Header::new(PINNED_ALGORITHM), claims, &self.encoding_key)
            .map(AccessToken::new)
            .map_err(|_| TokenError::EncodingFailed)
    }

    /// Verifies the signature and structure of `token`, accepting expired tokens
    pub fn decode_ignoring_expiry(&self, token: &str) -> Result<ClaimSet, TokenError> {
        decode::<ClaimSet>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| map_decode_error(e.kind()))
    }

    /// Verifies `token` and rejects it once its expiry has been reached
    pub fn decode_and_check_expiry(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.decode_checked_at(token, Utc::now())
    }

    pub(crate) fn decode_checked_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, TokenError> {
        let claims = self.decode_ignoring_expiry(token)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for ClaimsCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimsCodec")
            .field("algorithm", &PINNED_ALGORITHM)
            .finish_non_exhaustive()
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => TokenError::AlgorithmMismatch,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
