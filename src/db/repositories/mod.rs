//! Database repositories
//!
//! Repositories handle all direct database interactions. Handlers and
//! services only see the [`PredictionStore`] trait.

pub mod prediction_repo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{NewPrediction, Prediction, PredictionAverage, PredictionStats},
};

pub use prediction_repo::PredictionRepository;

/// Storage of prediction records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Insert `prediction` unless it is rate limited or its username is taken.
    ///
    /// Checks run in this order and atomically with the insert:
    /// 1. any row with the same `ip_hash` submitted after `window_start`
    ///    fails with [`AppError::TooManyRequests`](crate::error::AppError::TooManyRequests);
    /// 2. any row whose username equals the new one case-insensitively
    ///    fails with [`AppError::UsernameTaken`](crate::error::AppError::UsernameTaken).
    async fn insert_guarded(
        &self,
        prediction: &NewPrediction,
        window_start: DateTime<Utc>,
    ) -> AppResult<Prediction>;

    /// Mean of `days_until_pop` and row count
    async fn average(&self) -> AppResult<PredictionAverage>;

    /// Count, mean, min and max of `days_until_pop`
    async fn stats(&self) -> AppResult<PredictionStats>;
}
