//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use async_trait::async_trait;

/// Errors raised by the mapping store.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The code is already present. The existing record is left untouched.
    #[error("Short code '{code}' already exists")]
    DuplicateCode { code: String },

    /// Any I/O or driver failure. Never means "not found".
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Repository interface for the code → URL mapping store.
///
/// The store returns facts only; expiry is interpreted by
/// [`crate::application::services::ShortUrlService`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryShortUrlRepository`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Best-effort existence check.
    ///
    /// Not a substitute for the uniqueness guarantee of [`Self::insert`].
    async fn exists(&self, code: &str) -> Result<bool, RepositoryError>;

    /// Atomically stores a new record keyed by its code.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateCode`] if the code is already present.
    /// Returns [`RepositoryError::Storage`] on backend errors.
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, RepositoryError>;

    /// Point lookup by code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortUrl))` if found, expired or not
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, RepositoryError>;

    /// Checks that the backend is reachable.
    async fn health_check(&self) -> bool;
}
