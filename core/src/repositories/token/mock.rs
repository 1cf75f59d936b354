//! Mock implementation of RefreshTokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenRepository;

/// Mock refresh token repository for testing
///
/// `mark_used` holds the write lock across the check and the update, so it is a
/// genuine compare-and-set. Two knobs let tests reach paths a well-behaved store
/// rarely produces:
/// - `fail_requests` makes every call return an infrastructure error;
/// - `stale_reads` makes `find_by_token` report `used = false`, simulating a
///   lookup that raced with another request's `mark_used`.
pub struct MockRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    fail_requests: AtomicBool,
    stale_reads: AtomicBool,
}

impl MockRefreshTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            fail_requests: AtomicBool::new(false),
            stale_reads: AtomicBool::new(false),
        }
    }

    /// Toggle simulated store outages
    pub fn set_failing(&self, failing: bool) {
        self.fail_requests.store(failing, Ordering::SeqCst);
    }

    /// Toggle stale `used` flags on lookups
    pub fn set_stale_reads(&self, stale: bool) {
        self.stale_reads.store(stale, Ordering::SeqCst);
    }

    /// Current stored state of a token, bypassing the knobs
    pub async fn snapshot(&self, token: &str) -> Option<RefreshToken> {
        self.tokens.read().await.get(token).cloned()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(DomainError::infrastructure("refresh token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token) {
            return Err(DomainError::infrastructure("duplicate refresh token"));
        }

        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.check_available()?;
        let tokens = self.tokens.read().await;

        let mut found = tokens.get(token).cloned();
        if self.stale_reads.load(Ordering::SeqCst) {
            if let Some(record) = found.as_mut() {
                record.used = false;
            }
        }
        Ok(found)
    }

    async fn mark_used(&self, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token) {
            Some(record) if !record.used => {
                record.used = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn invalidate(&self, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token) {
            Some(record) if !record.invalidated => {
                record.invalidated = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn invalidate_all_for_user(&self, user_id: &str) -> Result<usize, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;
        let mut count = 0;

        for record in tokens.values_mut() {
            if record.user_id == user_id && !record.invalidated {
                record.invalidated = true;
                count += 1;
            }
        }

        Ok(count)
    }
}
