//! Process-local refresh token store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use tb_core::domain::entities::token::RefreshToken;
use tb_core::errors::DomainError;
use tb_core::repositories::RefreshTokenRepository;

/// Refresh token store backed by a locked map
///
/// Every mutation takes the write lock for the whole check-and-update, which
/// makes `mark_used` a compare-and-set.
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token) {
            return Err(DomainError::infrastructure("refresh token already exists"));
        }

        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self.tokens.read().await.get(token).cloned())
    }

    async fn mark_used(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        Ok(match tokens.get_mut(token) {
            Some(record) if !record.used => {
                record.used = true;
                true
            }
            _ => false,
        })
    }

    async fn invalidate(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;

        Ok(match tokens.get_mut(token) {
            Some(record) if !record.invalidated => {
                record.invalidated = true;
                true
            }
            _ => false,
        })
    }

    async fn invalidate_all_for_user(&self, user_id: &str) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;

        let revoked = tokens
            .values_mut()
            .filter(|record| record.user_id == user_id && !record.invalidated)
            .map(|record| record.invalidated = true)
            .count();

        Ok(revoked)
    }
}
