//! In-memory stores
//!
//! Used when no database is configured. State lives for the lifetime of the
//! process and is shared between clones through `Arc`.

mod refresh_token_repository;
mod user_repository;

#[cfg(test)]
mod tests;

pub use refresh_token_repository::InMemoryRefreshTokenRepository;
pub use user_repository::InMemoryUserRepository;
