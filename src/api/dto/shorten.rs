//! DTOs for the link shortening and lookup endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::{CreateShortUrl, CreatedShortUrl};
use crate::domain::entities::ShortUrl;

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("custom code regex is valid"));

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: String,

    /// Optional lifetime in seconds. Absent means the link never expires.
    #[validate(range(min = 1, message = "TTL must be a positive number of seconds"))]
    pub ttl_seconds: Option<i64>,

    /// Optional custom short code.
    #[validate(length(min = 4, max = 8, message = "Custom code must be 4-8 characters"))]
    #[validate(regex(
        path = *CUSTOM_CODE_REGEX,
        message = "Custom code can only contain letters and digits"
    ))]
    pub code: Option<String>,
}

impl From<ShortenRequest> for CreateShortUrl {
    fn from(request: ShortenRequest) -> Self {
        CreateShortUrl {
            long_url: request.long_url,
            custom_code: request.code,
            ttl_seconds: request.ttl_seconds,
        }
    }
}

/// Response for a created short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub ttl_seconds: Option<i64>,
    pub short_url: String,
}

impl From<CreatedShortUrl> for ShortenResponse {
    fn from(created: CreatedShortUrl) -> Self {
        let ttl_seconds = created.record.ttl_seconds();
        let ShortUrl {
            code,
            long_url,
            created_at,
            expires_at,
        } = created.record;

        Self {
            code,
            long_url,
            created_at,
            expires_at,
            ttl_seconds,
            short_url: created.short_url,
        }
    }
}

/// Stored metadata for a code, including its current expiry state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlInfo {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub ttl_seconds: Option<i64>,
    pub short_url: String,
    pub expired: bool,
}
