//! PopTracker - Prediction Collection Service
//!
//! This library provides the backend for collecting "days until the bubble
//! pops" predictions and serving their running average.
//!
//! # Endpoints
//!
//! - `POST /api/predictions` - submit a prediction, get the updated average
//! - `GET /api/predictions/average` - rounded mean and projected date
//! - `GET /api/predictions/stats` - count, mean, min and max
//!
//! Any other request is served from the static asset directory.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access behind the `PredictionStore` trait
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use axum::{Router, middleware::from_fn, middleware::from_fn_with_state};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with all middleware applied
pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config().http.static_dir);

    handlers::routes(assets)
        .layer(CompressionLayer::new())
        .layer(from_fn_with_state(state.clone(), middleware::cors_middleware))
        .layer(from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
