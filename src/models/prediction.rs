//! Prediction model

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Prediction database model
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prediction {
    pub id: i64,
    pub username: Option<String>,
    pub days_until_pop: i32,
    pub submitted_at: DateTime<Utc>,
    pub predicted_date: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub ip_hash: String,
}

/// A validated prediction ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrediction {
    pub username: Option<String>,
    pub days_until_pop: i32,
    pub submitted_at: DateTime<Utc>,
    pub predicted_date: DateTime<Utc>,
    pub ip_hash: String,
}

impl NewPrediction {
    /// Build a prediction submitted at `now`.
    ///
    /// `now` is truncated to microseconds, the resolution PostgreSQL stores,
    /// so `predicted_date - submitted_at` is exactly `days_until_pop` days
    /// after a round trip through the database.
    pub fn new(
        username: Option<String>,
        days_until_pop: i32,
        ip_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        let submitted_at = now.trunc_subsecs(6);
        Self {
            username,
            days_until_pop,
            submitted_at,
            predicted_date: submitted_at + Duration::days(i64::from(days_until_pop)),
            ip_hash,
        }
    }
}

/// Mean and count over every stored prediction
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct PredictionAverage {
    pub avg_days: Option<f64>,
    pub total_predictions: i64,
}

/// Count, mean, min and max over every stored prediction.
///
/// Over an empty table every aggregate except the count is `None`.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct PredictionStats {
    pub total_predictions: i64,
    pub avg_days: Option<f64>,
    pub min_days: Option<i32>,
    pub max_days: Option<i32>,
}
