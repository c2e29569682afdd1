//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::domain::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **307 Temporary Redirect** to the long URL
/// - **404 Not Found** if the code was never created
/// - **410 Gone** if the code existed but its TTL has elapsed
/// - **500 Internal Server Error** on storage failure
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    match state.short_url_service.resolve(&code).await? {
        Resolution::Found(record) => {
            debug!(code = %record.code, "Redirecting");
            Ok(Redirect::temporary(&record.long_url))
        }
        Resolution::NotFound => Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        )),
        Resolution::Expired { expired_at } => Err(AppError::gone(
            "Short link has expired",
            json!({ "code": code, "expired_at": expired_at }),
        )),
    }
}
