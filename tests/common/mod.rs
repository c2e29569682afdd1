#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tinylink::application::services::{DEFAULT_MAX_CODE_ATTEMPTS, ShortUrlService};
use tinylink::domain::entities::{NewShortUrl, ShortUrl};
use tinylink::domain::repositories::{RepositoryError, ShortUrlRepository};
use tinylink::domain::{ManualClock, ObjectIdAllocator};
use tinylink::infrastructure::persistence::MemoryShortUrlRepository;
use tinylink::routes::app_router;
use tinylink::state::AppState;
use tower_http::normalize_path::NormalizePath;

pub const BASE_URL: &str = "https://sho.rt";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

pub struct TestContext {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub repository: Arc<MemoryShortUrlRepository>,
}

pub fn create_test_state() -> TestContext {
    let repository = Arc::new(MemoryShortUrlRepository::new());
    create_test_state_with(repository.clone(), repository)
}

pub fn create_test_state_with(
    store: Arc<dyn ShortUrlRepository>,
    repository: Arc<MemoryShortUrlRepository>,
) -> TestContext {
    let clock = Arc::new(ManualClock::new(start_time()));

    let service = ShortUrlService::new(
        store,
        Arc::new(ObjectIdAllocator::new()),
        clock.clone(),
        BASE_URL,
        DEFAULT_MAX_CODE_ATTEMPTS,
    );

    TestContext {
        state: AppState::new(Arc::new(service)),
        clock,
        repository,
    }
}

/// The production router, wrapped the same way `server::run` serves it.
pub fn test_router(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state))
}

pub async fn insert_record(
    repository: &MemoryShortUrlRepository,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) -> ShortUrl {
    repository
        .insert(NewShortUrl {
            code: code.to_string(),
            long_url: url.to_string(),
            created_at: start_time(),
            expires_at,
        })
        .await
        .unwrap()
}

/// Repository whose backend is always down.
pub struct FailingRepository;

#[async_trait]
impl ShortUrlRepository for FailingRepository {
    async fn exists(&self, _code: &str) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".to_string()))
    }

    async fn insert(&self, _new_url: NewShortUrl) -> Result<ShortUrl, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".to_string()))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<ShortUrl>, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn create_failing_state() -> TestContext {
    create_test_state_with(
        Arc::new(FailingRepository),
        Arc::new(MemoryShortUrlRepository::new()),
    )
}
