//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShortUrlService;

/// Application state cloned into every request.
///
/// Cloning is cheap: the service is reference-counted and holds no
/// per-request data.
#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService>,
}

impl AppState {
    pub fn new(short_url_service: Arc<ShortUrlService>) -> Self {
        Self { short_url_service }
    }
}
