//! PostgreSQL repository tests.
//!
//! Require a reachable database in `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

use chrono::{Duration, SubsecRound, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tinylink::domain::entities::NewShortUrl;
use tinylink::domain::repositories::{RepositoryError, ShortUrlRepository};
use tinylink::infrastructure::persistence::PgShortUrlRepository;

fn new_url(code: &str, long_url: &str) -> NewShortUrl {
    NewShortUrl {
        code: code.to_string(),
        long_url: long_url.to_string(),
        created_at: Utc::now().trunc_subsecs(6),
        expires_at: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let mut new = new_url("test123", "https://example.com");
    new.expires_at = Some(new.created_at + Duration::seconds(60));

    let created = repo.insert(new.clone()).await.unwrap();
    assert_eq!(created.code, "test123");
    assert_eq!(created.long_url, "https://example.com");
    assert_eq!(created.created_at, new.created_at);
    assert_eq!(created.expires_at, new.expires_at);

    let found = repo.find_by_code("test123").await.unwrap();
    assert_eq!(found, Some(created));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("notfound").await.unwrap().is_none());
    assert!(!repo.exists("notfound").await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_insert_rejected(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.insert(new_url("abcd", "https://first.example"))
        .await
        .unwrap();

    let err = repo
        .insert(new_url("abcd", "https://second.example"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::DuplicateCode { .. }));

    let stored = repo.find_by_code("abcd").await.unwrap().unwrap();
    assert_eq!(stored.long_url, "https://first.example");
    assert!(repo.exists("abcd").await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_duplicate_inserts(pool: PgPool) {
    let repo = Arc::new(PgShortUrlRepository::new(Arc::new(pool)));

    let (a, b) = tokio::join!(
        repo.insert(new_url("race", "https://a.example")),
        repo.insert(new_url("race", "https://b.example")),
    );

    assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_health_check(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));
    assert!(repo.health_check().await);
}
