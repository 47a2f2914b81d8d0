//! Prediction handlers

mod handler;
pub mod request;
pub mod response;


pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    constants::{AVERAGE_PATH, PREDICTIONS_PATH, STATS_PATH},
    state::AppState,
};

/// Prediction routes.
///
/// Any other method on these paths is handed to `assets` like an unknown path.
pub fn routes(assets: ServeDir) -> Router<AppState> {
    Router::new()
        .route(
            PREDICTIONS_PATH,
            post(handler::submit_prediction).fallback_service(assets.clone()),
        )
        .route(
            AVERAGE_PATH,
            get(handler::get_average).fallback_service(assets.clone()),
        )
        .route(
            STATS_PATH,
            get(handler::get_stats).fallback_service(assets),
        )
}
