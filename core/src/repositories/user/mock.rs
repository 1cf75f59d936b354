//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::identity::Identity;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

#[derive(Debug, Clone)]
struct StoredUser {
    identity: Identity,
    password: String,
}

/// Mock user repository for testing
///
/// Passwords are kept in plain text; only the password policy is enforced.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
    fail_requests: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            fail_requests: AtomicBool::new(false),
        }
    }

    /// Toggle simulated store outages
    pub fn set_failing(&self, failing: bool) {
        self.fail_requests.store(failing, Ordering::SeqCst);
    }

    /// Remove a user, leaving any of their refresh tokens behind
    pub async fn delete(&self, id: &str) -> bool {
        self.users.write().await.remove(id).is_some()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(DomainError::infrastructure("user store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.identity.email.eq_ignore_ascii_case(email))
            .map(|u| u.identity.clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.get(id).map(|u| u.identity.clone()))
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, DomainError> {
        self.check_available()?;
        tb_shared::validation::validate_credentials(email, password).map_err(AuthError::from)?;

        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.identity.email.eq_ignore_ascii_case(email))
        {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let identity = Identity::new(Uuid::new_v4().to_string(), email);
        users.insert(
            identity.id.clone(),
            StoredUser {
                identity: identity.clone(),
                password: password.to_string(),
            },
        );
        Ok(identity)
    }

    async fn check_password(&self, identity: &Identity, password: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users
            .get(&identity.id)
            .map(|u| u.password == password)
            .unwrap_or(false))
    }
}
