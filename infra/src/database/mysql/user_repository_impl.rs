//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tb_core::domain::entities::identity::Identity;
use tb_core::errors::{AuthError, DomainError};
use tb_core::repositories::UserRepository;
use tb_shared::validation::validate_credentials;

use crate::password::PasswordHasher;

/// MySQL implementation of UserRepository
///
/// Emails are unique under the table's case-insensitive collation.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
    hasher: PasswordHasher,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool, hasher: PasswordHasher) -> Self {
        Self { pool, hasher }
    }

    fn row_to_identity(row: &sqlx::mysql::MySqlRow) -> Result<Identity, DomainError> {
        let id: String = row.try_get("id").map_err(|e| db_error("read id", e))?;
        let email: String = row.try_get("email").map_err(|e| db_error("read email", e))?;
        Ok(Identity::new(id, email))
    }
}

fn db_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "User store failed to {}", context);
    DomainError::infrastructure(format!("Failed to {}: {}", context, error))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        let row = sqlx::query("SELECT id, email FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find user by email", e))?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, DomainError> {
        let row = sqlx::query("SELECT id, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find user by id", e))?;

        row.as_ref().map(Self::row_to_identity).transpose()
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, DomainError> {
        validate_credentials(email, password).map_err(AuthError::from)?;

        let identity = Identity::new(Uuid::new_v4().to_string(), email);
        let password_hash = self.hasher.hash(password).await?;

        let result = sqlx::query(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&identity.id)
        .bind(&identity.email)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(identity),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::UserAlreadyExists.into())
            }
            Err(e) => Err(db_error("create user", e)),
        }
    }

    async fn check_password(&self, identity: &Identity, password: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT password_hash FROM users WHERE id = ?")
            .bind(&identity.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("load password hash", e))?;

        let Some(row) = row else {
            return Ok(false);
        };
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| db_error("read password_hash", e))?;

        Ok(self.hasher.verify(password, &password_hash).await?)
    }
}
