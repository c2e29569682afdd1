//! Outcome of resolving an inbound short code.

use chrono::{DateTime, Utc};

use super::entities::ShortUrl;

/// The complete set of resolve outcomes.
///
/// `NotFound` and `Expired` are kept apart so callers can tell
/// "never existed" from "used to work".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ShortUrl),
    NotFound,
    Expired { expired_at: DateTime<Utc> },
}

impl Resolution {
    /// Redirect target, if the code resolved.
    pub fn long_url(&self) -> Option<&str> {
        match self {
            Resolution::Found(record) => Some(&record.long_url),
            _ => None,
        }
    }
}
