//! Tests for the in-memory refresh token store

use chrono::{Duration, Utc};
use uuid::Uuid;

use tb_core::domain::entities::token::RefreshToken;
use tb_core::repositories::RefreshTokenRepository;

use crate::memory::InMemoryRefreshTokenRepository;

fn record(token: &str, user_id: &str) -> RefreshToken {
    RefreshToken::new(
        token.to_string(),
        Uuid::new_v4(),
        user_id.to_string(),
        Utc::now(),
        Duration::days(180),
    )
}

#[tokio::test]
async fn test_insert_find_and_reject_duplicates() {
    let repo = InMemoryRefreshTokenRepository::new();
    let token = record("r1", "u1");

    repo.insert(token.clone()).await.unwrap();

    assert_eq!(repo.find_by_token("r1").await.unwrap(), Some(token));
    assert!(repo.find_by_token("r2").await.unwrap().is_none());
    assert!(repo.insert(record("r1", "u1")).await.is_err());
}

#[tokio::test]
async fn test_clones_share_state() {
    let repo = InMemoryRefreshTokenRepository::new();
    let clone = repo.clone();

    repo.insert(record("r1", "u1")).await.unwrap();

    assert!(clone.mark_used("r1").await.unwrap());
    assert!(repo.find_by_token("r1").await.unwrap().unwrap().used);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mark_used_single_winner_under_contention() {
    let repo = InMemoryRefreshTokenRepository::new();
    repo.insert(record("r1", "u1")).await.unwrap();

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.mark_used("r1").await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_invalidation() {
    let repo = InMemoryRefreshTokenRepository::new();
    for (token, user) in [("r1", "u1"), ("r2", "u1"), ("r3", "u2")] {
        repo.insert(record(token, user)).await.unwrap();
    }

    assert!(repo.invalidate("r3").await.unwrap());
    assert!(!repo.invalidate("missing").await.unwrap());
    assert_eq!(repo.invalidate_all_for_user("u1").await.unwrap(), 2);
    assert_eq!(repo.invalidate_all_for_user("u1").await.unwrap(), 0);
    assert!(repo.find_by_token("r2").await.unwrap().unwrap().invalidated);
}
