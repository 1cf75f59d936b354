//! Tests for the access token codec

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::ClaimSet;
use crate::errors::TokenError;
use crate::services::token::ClaimsCodec;

const SECRET: &[u8] = b"codec-test-secret-that-is-at-least-32-bytes";

fn claims(lifetime: Duration) -> ClaimSet {
    ClaimSet::for_identity(&Identity::new("user-1", "a@x.com"), Utc::now(), lifetime)
}

#[test]
fn test_round_trip_preserves_claims() {
    let codec = ClaimsCodec::new(SECRET);
    let original = claims(Duration::hours(2));

    let token = codec.issue(&original).unwrap();
    let decoded = codec.decode_ignoring_expiry(token.as_str()).unwrap();

    assert_eq!(decoded, original);
    assert_eq!(decoded.sub, "a@x.com");
    assert_eq!(decoded.user_id, "user-1");
}

#[test]
fn test_issue_is_deterministic() {
    let codec = ClaimsCodec::new(SECRET);
    let original = claims(Duration::hours(2));

    assert_eq!(codec.issue(&original).unwrap(), codec.issue(&original).unwrap());
}

#[test]
fn test_flipping_any_byte_breaks_the_token() {
    let codec = ClaimsCodec::new(SECRET);
    let token = codec.issue(&claims(Duration::hours(2))).unwrap().into_string();

    for position in 0..token.len() {
        let mut bytes = token.clone().into_bytes();
        bytes[position] ^= 0x01;
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(
            codec.decode_ignoring_expiry(&tampered).is_err(),
            "tampered byte {} was accepted",
            position
        );
    }
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = ClaimsCodec::new(SECRET).issue(&claims(Duration::hours(2))).unwrap();
    let other = ClaimsCodec::new(b"another-secret-of-sufficient-length-000000");

    assert_eq!(
        other.decode_ignoring_expiry(token.as_str()),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn test_other_hmac_algorithm_is_rejected() {
    let codec = ClaimsCodec::new(SECRET);
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims(Duration::hours(2)),
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap();

    assert_eq!(
        codec.decode_ignoring_expiry(&token),
        Err(TokenError::AlgorithmMismatch)
    );
}

#[test]
fn test_unsigned_token_is_rejected() {
    let codec = ClaimsCodec::new(SECRET);
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims(Duration::hours(2))).unwrap());

    for token in [format!("{}.{}.", header, payload), format!("{}.{}", header, payload)] {
        assert!(codec.decode_ignoring_expiry(&token).is_err());
    }
}

#[test]
fn test_garbage_is_malformed() {
    let codec = ClaimsCodec::new(SECRET);

    for token in ["", "not-a-token", "a.b.c", "...."] {
        assert_eq!(codec.decode_ignoring_expiry(token), Err(TokenError::Malformed));
    }
}

#[test]
fn test_expired_token_still_decodes_when_ignoring_expiry() {
    let codec = ClaimsCodec::new(SECRET);
    let issued_at = Utc::now() - Duration::hours(3);
    let expired = ClaimSet::for_identity(&Identity::new("user-1", "a@x.com"), issued_at, Duration::hours(2));
    let token = codec.issue(&expired).unwrap();

    assert_eq!(codec.decode_ignoring_expiry(token.as_str()).unwrap(), expired);
    assert_eq!(
        codec.decode_and_check_expiry(token.as_str()),
        Err(TokenError::Expired)
    );
}

#[test]
fn test_expiry_boundary_counts_as_expired() {
    let codec = ClaimsCodec::new(SECRET);
    let live = claims(Duration::hours(2));
    let token = codec.issue(&live).unwrap();

    assert_eq!(codec.decode_and_check_expiry(token.as_str()).unwrap(), live);
    assert_eq!(
        codec.decode_checked_at(token.as_str(), live.exp),
        Err(TokenError::Expired)
    );
    assert!(codec
        .decode_checked_at(token.as_str(), live.exp - Duration::seconds(1))
        .is_ok());
}
