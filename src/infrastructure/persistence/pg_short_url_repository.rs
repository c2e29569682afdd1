//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{RepositoryError, ShortUrlRepository};
use crate::infrastructure::persistence::db_error::{is_unique_violation_on_code, storage_error};

/// PostgreSQL repository for short URL storage and retrieval.
///
/// The `short_urls.code` primary key is the single source of uniqueness;
/// inserts never read before writing.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    code: String,
    long_url: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(row.code, row.long_url, row.created_at, row.expires_at)
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn exists(&self, code: &str) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM short_urls WHERE code = $1)")
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(storage_error)
    }

    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, RepositoryError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (code, long_url, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (code) DO NOTHING
            RETURNING code, long_url, created_at, expires_at
            "#,
        )
        .bind(&new_url.code)
        .bind(&new_url.long_url)
        .bind(new_url.created_at)
        .bind(new_url.expires_at)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                RepositoryError::DuplicateCode {
                    code: new_url.code.clone(),
                }
            } else {
                storage_error(e)
            }
        })?;

        row.map(ShortUrl::from)
            .ok_or(RepositoryError::DuplicateCode { code: new_url.code })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, RepositoryError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT code, long_url, created_at, expires_at
            FROM short_urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(storage_error)?;

        Ok(row.map(ShortUrl::from))
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
