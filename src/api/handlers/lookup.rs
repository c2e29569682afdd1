//! Handler for short URL metadata lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::shorten::ShortUrlInfo;
use crate::error::AppError;
use crate::state::AppState;

/// Returns stored metadata for a code without redirecting.
///
/// Expired records are still returned, flagged with `"expired": true`.
///
/// # Endpoint
///
/// `GET /api/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code was never created.
pub async fn lookup_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortUrlInfo>, AppError> {
    let service = &state.short_url_service;
    let record = service.get(&code).await?;

    let expired = record.is_expired_at(service.now());
    let ttl_seconds = record.ttl_seconds();
    let short_url = service.short_url_for(&record.code);

    Ok(Json(ShortUrlInfo {
        code: record.code,
        long_url: record.long_url,
        created_at: record.created_at,
        expires_at: record.expires_at,
        ttl_seconds,
        short_url,
        expired,
    }))
}
