//! Short URL creation and resolution service.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{RepositoryError, ShortUrlRepository};
use crate::domain::{Clock, IdAllocator, Resolution};
use crate::error::AppError;
use crate::utils::code_generator::{is_well_formed, synthesize, validate_custom_code};
use crate::utils::url_validator::validate_long_url;

/// Default bound on synthesis attempts before giving up.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 5;

/// Validated input for the create path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShortUrl {
    pub long_url: String,
    pub custom_code: Option<String>,
    pub ttl_seconds: Option<i64>,
}

/// A freshly stored record together with its public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedShortUrl {
    pub record: ShortUrl,
    pub short_url: String,
}

/// Service for creating and resolving short URLs.
///
/// Holds no mutable state of its own; the repository is the only shared
/// resource, and it alone enforces code uniqueness.
pub struct ShortUrlService {
    repository: Arc<dyn ShortUrlRepository>,
    id_allocator: Arc<dyn IdAllocator>,
    clock: Arc<dyn Clock>,
    base_url: String,
    max_code_attempts: usize,
}

impl ShortUrlService {
    /// Creates a new short URL service.
    ///
    /// `base_url` is the public prefix of every short URL; a trailing slash is
    /// ignored. `max_code_attempts` is clamped to at least one.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        id_allocator: Arc<dyn IdAllocator>,
        clock: Arc<dyn Clock>,
        base_url: impl Into<String>,
        max_code_attempts: usize,
    ) -> Self {
        Self {
            repository,
            id_allocator,
            clock,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_code_attempts: max_code_attempts.max(1),
        }
    }

    /// Creates a short URL.
    ///
    /// # Code Selection
    ///
    /// - If `custom_code` is provided, validates and inserts it once
    /// - Otherwise, synthesizes a code from a freshly allocated identifier,
    ///   retrying with a new identifier on collision up to `max_code_attempts`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL, custom code or TTL is invalid.
    /// Returns [`AppError::Conflict`] if the custom code is already taken.
    /// Returns [`AppError::Internal`] on storage errors or exhausted synthesis.
    pub async fn create(&self, request: CreateShortUrl) -> Result<CreatedShortUrl, AppError> {
        let long_url = validate_long_url(&request.long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let ttl = request.ttl_seconds.map(ttl_duration).transpose()?;

        let record = match request.custom_code {
            Some(code) => {
                validate_custom_code(&code)?;
                self.insert_custom(code, long_url, ttl).await?
            }
            None => self.insert_synthesized(long_url, ttl).await?,
        };

        info!(
            code = %record.code,
            expires_at = ?record.expires_at,
            "Short URL created"
        );

        let short_url = self.short_url_for(&record.code);
        Ok(CreatedShortUrl { record, short_url })
    }

    /// Resolves a code into a redirect decision.
    ///
    /// # State Machine
    ///
    /// 1. Lookup: absent → [`Resolution::NotFound`]
    /// 2. Expiry: `expires_at <= now` → [`Resolution::Expired`]
    /// 3. Otherwise → [`Resolution::Found`]
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors. A storage failure is
    /// never reported as `NotFound`.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        if !is_well_formed(code) {
            debug!(code, "Malformed code, skipping lookup");
            return Ok(Resolution::NotFound);
        }

        let Some(record) = self.repository.find_by_code(code).await? else {
            debug!(code, "Short URL not found");
            return Ok(Resolution::NotFound);
        };

        let now = self.clock.now();
        if let Some(expired_at) = record.expires_at.filter(|&at| at <= now) {
            debug!(code, %expired_at, "Short URL expired");
            return Ok(Resolution::Expired { expired_at });
        }

        Ok(Resolution::Found(record))
    }

    /// Retrieves a stored record regardless of expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get(&self, code: &str) -> Result<ShortUrl, AppError> {
        let record = if is_well_formed(code) {
            self.repository.find_by_code(code).await?
        } else {
            None
        };

        record.ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Best-effort availability check for a code.
    pub async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.repository.exists(code).await?)
    }

    /// Reports whether the backing store is reachable.
    pub async fn storage_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    /// Current time according to the service clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Constructs the public short URL for a code.
    pub fn short_url_for(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    async fn insert_custom(
        &self,
        code: String,
        long_url: String,
        ttl: Option<Duration>,
    ) -> Result<ShortUrl, AppError> {
        let new_url = self.build_record(code, long_url, ttl)?;

        match self.repository.insert(new_url).await {
            Ok(record) => Ok(record),
            Err(RepositoryError::DuplicateCode { code }) => {
                debug!(%code, "Custom code already taken");
                Err(AppError::conflict(
                    "Custom code is already taken",
                    json!({ "code": code }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Synthesizes a code and inserts it, with bounded retry on collision.
    async fn insert_synthesized(
        &self,
        long_url: String,
        ttl: Option<Duration>,
    ) -> Result<ShortUrl, AppError> {
        for attempt in 1..=self.max_code_attempts {
            let id = self.id_allocator.allocate();
            let code = synthesize(id);
            let new_url = self.build_record(code, long_url.clone(), ttl)?;

            match self.repository.insert(new_url).await {
                Ok(record) => return Ok(record),
                Err(RepositoryError::DuplicateCode { code }) => {
                    warn!(%code, %id, attempt, "Synthesized code collided");
                }
                Err(e) => return Err(e.into()),
            }
        }

        error!(
            attempts = self.max_code_attempts,
            "Exhausted code synthesis attempts; identifier source is not unique"
        );
        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    fn build_record(
        &self,
        code: String,
        long_url: String,
        ttl: Option<Duration>,
    ) -> Result<NewShortUrl, AppError> {
        let created_at = self.clock.now();
        let expires_at = ttl
            .map(|ttl| {
                created_at.checked_add_signed(ttl).ok_or_else(|| {
                    AppError::bad_request(
                        "TTL is too large",
                        json!({ "ttl_seconds": ttl.num_seconds() }),
                    )
                })
            })
            .transpose()?;

        Ok(NewShortUrl {
            code,
            long_url,
            created_at,
            expires_at,
        })
    }
}

fn ttl_duration(ttl_seconds: i64) -> Result<Duration, AppError> {
    if ttl_seconds <= 0 {
        return Err(AppError::bad_request(
            "TTL must be a positive number of seconds",
            json!({ "ttl_seconds": ttl_seconds }),
        ));
    }

    Duration::try_seconds(ttl_seconds).ok_or_else(|| {
        AppError::bad_request("TTL is too large", json!({ "ttl_seconds": ttl_seconds }))
    })
}
