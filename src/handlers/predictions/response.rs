//! Prediction response DTOs

use serde::Serialize;

use crate::{models::PredictionStats, services::AverageSummary, utils::format_timestamp};

/// Running average response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageResponse {
    pub average_date: Option<String>,
    pub average_days: Option<i64>,
    pub total_predictions: i64,
}

impl From<AverageSummary> for AverageResponse {
    fn from(summary: AverageSummary) -> Self {
        Self {
            average_date: summary.average_date.map(format_timestamp),
            average_days: summary.average_days,
            total_predictions: summary.total_predictions,
        }
    }
}

/// Response to an accepted submission
#[derive(Debug, Serialize)]
pub struct SubmitPredictionResponse {
    pub success: bool,
    #[serde(flatten)]
    pub average: AverageResponse,
}

impl From<AverageSummary> for SubmitPredictionResponse {
    fn from(summary: AverageSummary) -> Self {
        Self {
            success: true,
            average: AverageResponse::from(summary),
        }
    }
}

/// Summary statistics response (snake_case on the wire)
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_predictions: i64,
    pub avg_days: Option<f64>,
    pub min_days: Option<i32>,
    pub max_days: Option<i32>,
}

impl From<PredictionStats> for StatsResponse {
    fn from(stats: PredictionStats) -> Self {
        Self {
            total_predictions: stats.total_predictions,
            avg_days: stats.avg_days,
            min_days: stats.min_days,
            max_days: stats.max_days,
        }
    }
}
