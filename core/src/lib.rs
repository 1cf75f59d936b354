//! # Tweetbook Core
//!
//! Token lifecycle logic and domain layer for Tweetbook identity.
//! This crate contains domain entities, the claims codec, token issuance,
//! the refresh exchange, repository interfaces and error types. Storage and
//! HTTP concerns live in the `tb_infra` and `tb_api` crates.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{AccessToken, AuthResult, ClaimSet, Identity, RefreshToken, TokenPair};
pub use errors::{AuthError, DomainError, TokenError};
pub use repositories::{RefreshTokenRepository, UserRepository};
pub use services::{
    AuthGateway, ClaimsCodec, RefreshCoordinator, TokenIssuer, TokenServiceConfig, PINNED_ALGORITHM,
};
