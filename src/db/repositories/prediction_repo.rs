//! Prediction repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::{NewPrediction, Prediction, PredictionAverage, PredictionStats},
};

use super::PredictionStore;

/// PostgreSQL-backed prediction storage
#[derive(Clone)]
pub struct PredictionRepository {
    pool: PgPool,
}

impl PredictionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionStore for PredictionRepository {
    async fn insert_guarded(
        &self,
        prediction: &NewPrediction,
        window_start: DateTime<Utc>,
    ) -> AppResult<Prediction> {
        let mut tx = self.pool.begin().await?;

        // Serializes submissions from one IP until commit/rollback
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(&prediction.ip_hash)
            .execute(&mut *tx)
            .await?;

        let recent: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT id FROM predictions
            WHERE ip_hash = $1 AND submitted_at > $2
            LIMIT 1
            "#,
        )
        .bind(&prediction.ip_hash)
        .bind(window_start)
        .fetch_optional(&mut *tx)
        .await?;

        if recent.is_some() {
            return Err(AppError::TooManyRequests);
        }

        if let Some(username) = prediction.username.as_deref() {
            let existing: Option<i64> = sqlx::query_scalar(
                r#"
                SELECT id FROM predictions
                WHERE username IS NOT NULL AND LOWER(username) = LOWER($1)
                LIMIT 1
                "#,
            )
            .bind(username)
            .fetch_optional(&mut *tx)
            .await?;

            if existing.is_some() {
                return Err(AppError::UsernameTaken);
            }
        }

        // A concurrent insert of the same username still trips the unique
        // index, which `From<sqlx::Error>` maps to `UsernameTaken`.
        let stored = sqlx::query_as::<_, Prediction>(
            r#"
            INSERT INTO predictions (username, days_until_pop, submitted_at, predicted_date, ip_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(prediction.username.as_deref())
        .bind(prediction.days_until_pop)
        .bind(prediction.submitted_at)
        .bind(prediction.predicted_date)
        .bind(&prediction.ip_hash)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(stored)
    }

    async fn average(&self) -> AppResult<PredictionAverage> {
        let average = sqlx::query_as::<_, PredictionAverage>(
            r#"
            SELECT
                AVG(days_until_pop)::FLOAT8 AS avg_days,
                COUNT(*) AS total_predictions
            FROM predictions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(average)
    }

    async fn stats(&self) -> AppResult<PredictionStats> {
        let stats = sqlx::query_as::<_, PredictionStats>(
            r#"
            SELECT
                COUNT(*) AS total_predictions,
                AVG(days_until_pop)::FLOAT8 AS avg_days,
                MIN(days_until_pop) AS min_days,
                MAX(days_until_pop) AS max_days
            FROM predictions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
