//! Test utilities: an in-memory store and a router wired to it

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::{
    config::{Config, DatabaseConfig, HttpConfig, LogFormat, RateLimitConfig, ServerConfig},
    db::repositories::PredictionStore,
    error::{AppError, AppResult},
    models::{NewPrediction, Prediction, PredictionAverage, PredictionStats},
    state::AppState,
};

/// Vec-backed [`PredictionStore`] with the same guard semantics as PostgreSQL
#[derive(Default)]
pub struct MemoryPredictionStore {
    rows: Mutex<Vec<Prediction>>,
}

impl MemoryPredictionStore {
    /// Snapshot of every stored row
    pub async fn rows(&self) -> Vec<Prediction> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl PredictionStore for MemoryPredictionStore {
    async fn insert_guarded(
        &self,
        prediction: &NewPrediction,
        window_start: DateTime<Utc>,
    ) -> AppResult<Prediction> {
        let mut rows = self.rows.lock().await;

        if rows
            .iter()
            .any(|row| row.ip_hash == prediction.ip_hash && row.submitted_at > window_start)
        {
            return Err(AppError::TooManyRequests);
        }

        if let Some(username) = prediction.username.as_deref() {
            let lowered = username.to_lowercase();
            if rows.iter().any(|row| {
                row.username
                    .as_deref()
                    .is_some_and(|existing| existing.to_lowercase() == lowered)
            }) {
                return Err(AppError::UsernameTaken);
            }
        }

        let stored = Prediction {
            id: rows.len() as i64 + 1,
            username: prediction.username.clone(),
            days_until_pop: prediction.days_until_pop,
            submitted_at: prediction.submitted_at,
            predicted_date: prediction.predicted_date,
            ip_hash: prediction.ip_hash.clone(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn average(&self) -> AppResult<PredictionAverage> {
        let stats = self.stats().await?;
        Ok(PredictionAverage {
            avg_days: stats.avg_days,
            total_predictions: stats.total_predictions,
        })
    }

    async fn stats(&self) -> AppResult<PredictionStats> {
        let rows = self.rows.lock().await;
        let days = rows.iter().map(|row| row.days_until_pop);
        let total = rows.len() as i64;
        let sum: i64 = days.clone().map(i64::from).sum();

        Ok(PredictionStats {
            total_predictions: total,
            avg_days: (total > 0).then(|| sum as f64 / total as f64),
            min_days: days.clone().min(),
            max_days: days.max(),
        })
    }
}

/// Configuration for tests; nothing is read from the environment
pub fn test_config(static_dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            log_format: LogFormat::Text,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
        },
        http: HttpConfig {
            static_dir: static_dir.to_path_buf(),
            ..HttpConfig::default()
        },
        rate_limit: RateLimitConfig::default(),
    }
}

/// Build the full application router over `store`
pub fn test_app(store: Arc<dyn PredictionStore>, static_dir: &Path) -> Router {
    let state = AppState::new(store, test_config(static_dir));
    crate::create_router(state)
}
