//! Process-local user store with bcrypt password hashes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use tb_core::domain::entities::identity::Identity;
use tb_core::errors::{AuthError, DomainError};
use tb_core::repositories::UserRepository;
use tb_shared::validation::validate_credentials;

use crate::password::PasswordHasher;

#[derive(Debug, Clone)]
struct UserRecord {
    identity: Identity,
    password_hash: String,
}

/// User store keyed by user id
///
/// Emails are matched case-insensitively, like the MySQL store's collation.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
    hasher: PasswordHasher,
}

impl InMemoryUserRepository {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            hasher,
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(PasswordHasher::default())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|record| record.identity.email.eq_ignore_ascii_case(email))
            .map(|record| record.identity.clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError> {
        Ok(self.users.read().await.get(id).map(|record| record.identity.clone()))
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, DomainError> {
        validate_credentials(email, password).map_err(AuthError::from)?;
        let password_hash = self.hasher.hash(password).await?;

        let mut users = self.users.write().await;
        if users
            .values()
            .any(|record| record.identity.email.eq_ignore_ascii_case(email))
        {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let identity = Identity::new(Uuid::new_v4().to_string(), email);
        users.insert(
            identity.id.clone(),
            UserRecord {
                identity: identity.clone(),
                password_hash,
            },
        );

        tracing::debug!(user_id = %identity.id, "Created user");
        Ok(identity)
    }

    async fn check_password(&self, identity: &Identity, password: &str) -> Result<bool, DomainError> {
        let password_hash = match self.users.read().await.get(&identity.id) {
            Some(record) => record.password_hash.clone(),
            None => return Ok(false),
        };

        Ok(self.hasher.verify(password, &password_hash).await?)
    }
}
