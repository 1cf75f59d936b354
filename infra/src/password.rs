//! Password hashing via bcrypt.

use crate::InfrastructureError;

/// bcrypt cost used in production.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hashes and verifies passwords off the async executor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Hasher with an explicit bcrypt cost (tests use the minimum, 4)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with bcrypt.
    pub async fn hash(&self, password: &str) -> Result<String, InfrastructureError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }

    /// Verify a password against a bcrypt hash.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, InfrastructureError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("Secret123!").await.unwrap();

        assert_ne!(hash, "Secret123!");
        assert!(hasher.verify("Secret123!", &hash).await.unwrap());
        assert!(!hasher.verify("Secret123?", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new(4);

        let first = hasher.hash("Secret123!").await.unwrap();
        let second = hasher.hash("Secret123!").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_garbage_hash_is_an_error() {
        let hasher = PasswordHasher::new(4);

        assert!(hasher.verify("Secret123!", "not-a-bcrypt-hash").await.is_err());
    }
}
