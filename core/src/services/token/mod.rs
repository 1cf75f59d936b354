//! Token module for access token signing and pair issuance
//!
//! - `ClaimsCodec` signs and verifies access tokens with a pinned algorithm
//! - `TokenIssuer` mints an access token together with its refresh token record

mod codec;
mod config;
mod issuer;

#[cfg(test)]
mod tests;

pub use codec::{ClaimsCodec, PINNED_ALGORITHM};
pub use config::TokenServiceConfig;
pub use issuer::{TokenIssuer, REFRESH_TOKEN_LENGTH};
