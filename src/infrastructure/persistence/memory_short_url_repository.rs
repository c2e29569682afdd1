//! In-process implementation of the short URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{RepositoryError, ShortUrlRepository};

/// Map-backed repository for tests and single-node deployments.
///
/// Insert uniqueness relies on the shard lock held by [`DashMap::entry`], so
/// concurrent inserts of the same code cannot both succeed. Data does not
/// survive a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryShortUrlRepository {
    inner: Arc<DashMap<String, ShortUrl>>,
}

impl MemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl ShortUrlRepository for MemoryShortUrlRepository {
    async fn exists(&self, code: &str) -> Result<bool, RepositoryError> {
        Ok(self.inner.contains_key(code))
    }

    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, RepositoryError> {
        match self.inner.entry(new_url.code.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::DuplicateCode { code: new_url.code }),
            Entry::Vacant(slot) => {
                let record = ShortUrl::from(new_url);
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, RepositoryError> {
        Ok(self.inner.get(code).map(|r| r.value().clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
