//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod predictions;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create all API routes. Everything else is served from `assets`.
pub fn routes(assets: ServeDir) -> Router<AppState> {
    Router::new()
        .merge(predictions::routes(assets.clone()))
        .fallback_service(assets)
}
