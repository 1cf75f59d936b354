//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! Tokens are stored under their SHA-256 hash; the raw value handed to the
//! client never reaches the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tb_core::domain::entities::token::RefreshToken;
use tb_core::errors::DomainError;
use tb_core::repositories::RefreshTokenRepository;

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a token value using SHA-256
    ///
    /// # Returns
    /// Hexadecimal string representation of the SHA-256 hash
    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    /// Convert a database row back into a RefreshToken
    ///
    /// The row only holds the hash, so the caller supplies the raw token.
    fn row_to_token(token: &str, row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let jwt_id: String = row.try_get("jwt_id").map_err(|e| db_error("read jwt_id", e))?;

        Ok(RefreshToken {
            token: token.to_string(),
            jwt_id: Uuid::parse_str(&jwt_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid jwt_id UUID: {}", e),
            })?,
            user_id: row.try_get("user_id").map_err(|e| db_error("read user_id", e))?,
            creation_date: row
                .try_get::<DateTime<Utc>, _>("creation_date")
                .map_err(|e| db_error("read creation_date", e))?,
            expiry_date: row
                .try_get::<DateTime<Utc>, _>("expiry_date")
                .map_err(|e| db_error("read expiry_date", e))?,
            used: row.try_get("used").map_err(|e| db_error("read used", e))?,
            invalidated: row
                .try_get("invalidated")
                .map_err(|e| db_error("read invalidated", e))?,
        })
    }
}

fn db_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "Refresh token store failed to {}", context);
    DomainError::infrastructure(format!("Failed to {}: {}", context, error))
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                token_hash, jwt_id, user_id, creation_date, expiry_date, used, invalidated
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(Self::hash_token(&token.token))
            .bind(token.jwt_id.to_string())
            .bind(&token.user_id)
            .bind(token.creation_date)
            .bind(token.expiry_date)
            .bind(token.used)
            .bind(token.invalidated)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("save refresh token", e))?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT jwt_id, user_id, creation_date, expiry_date, used, invalidated
            FROM refresh_tokens
            WHERE token_hash = ?
        "#;

        let row = sqlx::query(query)
            .bind(Self::hash_token(token))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find refresh token", e))?;

        row.map(|row| Self::row_to_token(token, &row)).transpose()
    }

    async fn mark_used(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE refresh_tokens SET used = TRUE WHERE token_hash = ? AND used = FALSE")
            .bind(Self::hash_token(token))
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("mark refresh token used", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn invalidate(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET invalidated = TRUE WHERE token_hash = ? AND invalidated = FALSE",
        )
        .bind(Self::hash_token(token))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("invalidate refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn invalidate_all_for_user(&self, user_id: &str) -> Result<usize, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET invalidated = TRUE WHERE user_id = ? AND invalidated = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("invalidate user refresh tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}
