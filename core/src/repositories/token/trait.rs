//! Refresh token repository trait defining the persistence contract.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for refresh token records
///
/// Records are keyed by the opaque `token` string. Every method returns
/// `DomainError::Infrastructure` when the backing store cannot be reached.
///
/// # Concurrency contract
/// [`mark_used`](RefreshTokenRepository::mark_used) must be an atomic
/// compare-and-set: of any number of concurrent calls for the same token, at most
/// one may return `Ok(true)`. A read followed by an unconditional write does not
/// satisfy this; use a conditional update (`... WHERE used = FALSE`) or an
/// exclusive lock around the check and the write.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a new refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The stored record
    /// * `Err(DomainError)` - Store failure (including a duplicate token)
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token record by its opaque token value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Record found
    /// * `Ok(None)` - No such token
    /// * `Err(DomainError)` - Store failure
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Mark the token as used if and only if it is currently unused
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the transition
    /// * `Ok(false)` - Token missing or already used by someone else
    /// * `Err(DomainError)` - Store failure
    async fn mark_used(&self, token: &str) -> Result<bool, DomainError>;

    /// Revoke a single refresh token
    ///
    /// # Returns
    /// * `Ok(true)` - Token was invalidated by this call
    /// * `Ok(false)` - Token missing or already invalidated
    async fn invalidate(&self, token: &str) -> Result<bool, DomainError>;

    /// Revoke every outstanding refresh token of a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records newly invalidated
    async fn invalidate_all_for_user(&self, user_id: &str) -> Result<usize, DomainError>;
}

#[async_trait]
impl<T: RefreshTokenRepository + ?Sized> RefreshTokenRepository for Arc<T> {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        (**self).insert(token).await
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        (**self).find_by_token(token).await
    }

    async fn mark_used(&self, token: &str) -> Result<bool, DomainError> {
        (**self).mark_used(token).await
    }

    async fn invalidate(&self, token: &str) -> Result<bool, DomainError> {
        (**self).invalidate(token).await
    }

    async fn invalidate_all_for_user(&self, user_id: &str) -> Result<usize, DomainError> {
        (**self).invalidate_all_for_user(user_id).await
    }
}
