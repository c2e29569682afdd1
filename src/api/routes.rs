//! API route configuration.

use crate::api::handlers::{lookup_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`      - Create a short URL
/// - `GET  /urls/{code}`  - Stored metadata for a code
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls/{code}", get(lookup_handler))
}
