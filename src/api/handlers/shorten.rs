//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/article",
///   "ttlSeconds": 60,   // optional
///   "code": "abcd"      // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "abcd",
///   "longUrl": "https://example.com/article",
///   "createdAt": "2026-01-01T12:00:00Z",
///   "expiresAt": "2026-01-01T12:01:00Z",
///   "ttlSeconds": 60,
///   "shortUrl": "https://sho.rt/abcd"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body fails validation
/// - 409 Conflict if the custom code is already taken
/// - 500 Internal Server Error on storage failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let created = state.short_url_service.create(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
