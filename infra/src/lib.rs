//! # Infrastructure Layer
//!
//! Concrete stores behind the repository traits of `tb_core`:
//! - **Database**: MySQL implementations using SQLx
//! - **Memory**: process-local stores for development and tests
//! - **Password**: bcrypt hashing shared by both user stores
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use tb_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// In-memory stores
pub mod memory;

/// Password hashing
pub mod password;

pub use memory::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
pub use password::PasswordHasher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Blocking task failed to complete
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::infrastructure(error.to_string())
    }
}
