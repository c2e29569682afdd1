//! Short URL entity representing a code → long URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted short URL mapping.
///
/// Records are immutable once stored: there is no update or delete path.
/// Expiry is a read-time interpretation of `expires_at` against the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortUrl {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            code,
            long_url,
            created_at,
            expires_at,
        }
    }

    /// TTL in whole seconds, derived from the stored timestamps.
    pub fn ttl_seconds(&self) -> Option<i64> {
        self.expires_at
            .map(|expires_at| (expires_at - self.created_at).num_seconds())
    }

    /// Returns true once `now` has reached the expiry instant.
    ///
    /// The boundary is inclusive: a record with `expires_at == now` is expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Input data for inserting a new short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<NewShortUrl> for ShortUrl {
    fn from(new: NewShortUrl) -> Self {
        ShortUrl::new(new.code, new.long_url, new.created_at, new.expires_at)
    }
}
