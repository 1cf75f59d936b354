//! User repository trait defining the interface to the user store.
//!
//! The token lifecycle only needs to resolve identities and verify passwords;
//! how users are stored and how passwords are hashed is up to the implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::identity::Identity;
use crate::errors::DomainError;

/// Repository trait for user lookups and credential checks
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use tb_core::domain::entities::identity::Identity;
/// use tb_core::errors::DomainError;
/// use tb_core::repositories::UserRepository;
///
/// struct DirectoryUserRepository {
///     // directory client
/// }
///
/// #[async_trait]
/// impl UserRepository for DirectoryUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError> { Ok(None) }
/// #   async fn create_user(&self, email: &str, password: &str) -> Result<Identity, DomainError> { unimplemented!() }
/// #   async fn check_password(&self, identity: &Identity, password: &str) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Store failure
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError>;

    /// Find a user by store identifier
    ///
    /// # Returns
    /// * `Ok(Some(Identity))` - User found
    /// * `Ok(None)` - No such user
    /// * `Err(DomainError)` - Store failure
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError>;

    /// Create a user with the given credentials
    ///
    /// # Returns
    /// * `Ok(Identity)` - The new user
    /// * `Err(DomainError::Auth(AuthError::Validation { .. }))` - Email or password
    ///   rejected; carries every violated rule
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    /// * `Err(DomainError)` - Store failure
    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, DomainError>;

    /// Verify a password against the stored credentials of `identity`
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match, or the user no longer exists
    /// * `Err(DomainError)` - Store failure
    async fn check_password(&self, identity: &Identity, password: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        (**self).find_by_email(email).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, DomainError> {
        (**self).create_user(email, password).await
    }

    async fn check_password(&self, identity: &Identity, password: &str) -> Result<bool, DomainError> {
        (**self).check_password(identity, password).await
    }
}
