//! Business services containing the token lifecycle logic.

pub mod auth;
pub mod refresh;
pub mod token;

// Re-export commonly used types
pub use auth::AuthGateway;
pub use refresh::RefreshCoordinator;
pub use token::{ClaimsCodec, TokenIssuer, TokenServiceConfig, PINNED_ALGORITHM};
