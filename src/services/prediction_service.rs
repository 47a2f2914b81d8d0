//! Prediction service

use chrono::{DateTime, Duration, Utc};

use crate::{
    db::repositories::PredictionStore,
    error::AppResult,
    models::{NewPrediction, PredictionAverage, PredictionStats},
    utils::{days_from, hash_ip},
};

/// Running average projected onto the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AverageSummary {
    /// Mean prediction rounded to whole days; `None` when nothing is stored
    pub average_days: Option<i64>,
    /// `now + average_days` days
    pub average_date: Option<DateTime<Utc>>,
    pub total_predictions: i64,
}

impl AverageSummary {
    /// Project an aggregate from `now`
    pub fn project(average: PredictionAverage, now: DateTime<Utc>) -> Self {
        let average_days = match average.avg_days {
            Some(avg) if average.total_predictions > 0 => Some(round_half_up(avg)),
            _ => None,
        };

        Self {
            average_days,
            average_date: average_days.map(|days| days_from(now, days)),
            total_predictions: average.total_predictions,
        }
    }
}

/// Round to the nearest integer with halves going up (`2.5 -> 3`, `-2.5 -> -2`)
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// A submission that passed request validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Trimmed, non-empty username
    pub username: Option<String>,
    pub days_until_pop: i32,
}

/// Prediction service for business logic
pub struct PredictionService;

impl PredictionService {
    /// Store a submission from `client_ip` and return the updated average.
    ///
    /// At most one submission per client address is accepted within
    /// `rate_limit_window`.
    pub async fn submit(
        store: &dyn PredictionStore,
        submission: Submission,
        client_ip: &str,
        rate_limit_window: Duration,
        now: DateTime<Utc>,
    ) -> AppResult<AverageSummary> {
        let ip_hash = hash_ip(client_ip);
        let prediction = NewPrediction::new(
            submission.username,
            submission.days_until_pop,
            ip_hash,
            now,
        );
        let window_start = prediction
            .submitted_at
            .checked_sub_signed(rate_limit_window)
            .ok_or_else(|| {
                anyhow::anyhow!("rate limit window {} is out of range", rate_limit_window)
            })?;

        let stored = store.insert_guarded(&prediction, window_start).await?;
        tracing::info!(
            id = stored.id,
            days_until_pop = stored.days_until_pop,
            named = stored.username.is_some(),
            ip_hash = %stored.ip_hash.get(..8).unwrap_or(stored.ip_hash.as_str()),
            "Prediction stored"
        );

        let average = store.average().await?;
        Ok(AverageSummary::project(average, now))
    }

    /// Current average over every stored prediction
    pub async fn average(
        store: &dyn PredictionStore,
        now: DateTime<Utc>,
    ) -> AppResult<AverageSummary> {
        let average = store.average().await?;
        Ok(AverageSummary::project(average, now))
    }

    /// Count, mean, min and max over every stored prediction
    pub async fn stats(store: &dyn PredictionStore) -> AppResult<PredictionStats> {
        store.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, test_utils::MemoryPredictionStore};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn submission(username: Option<&str>, days: i32) -> Submission {
        Submission {
            username: username.map(str::to_string),
            days_until_pop: days,
        }
    }

    #[test]
    fn test_projection_of_empty_table() {
        let summary = AverageSummary::project(
            PredictionAverage {
                avg_days: None,
                total_predictions: 0,
            },
            now(),
        );

        assert_eq!(summary.average_days, None);
        assert_eq!(summary.average_date, None);
        assert_eq!(summary.total_predictions, 0);
    }

    #[test]
    fn test_projection_rounds_half_up() {
        let summary = AverageSummary::project(
            PredictionAverage {
                avg_days: Some(12.5),
                total_predictions: 2,
            },
            now(),
        );

        assert_eq!(summary.average_days, Some(13));
        assert_eq!(summary.average_date, Some(now() + Duration::days(13)));

        assert_eq!(round_half_up(12.49), 12);
        assert_eq!(round_half_up(-2.5), -2);
    }

    #[tokio::test]
    async fn test_submit_updates_running_average() {
        let store = MemoryPredictionStore::default();
        let window = Duration::minutes(5);

        let first = PredictionService::submit(&store, submission(None, 10), "10.0.0.1", window, now())
            .await
            .unwrap();
        assert_eq!(first.average_days, Some(10));
        assert_eq!(first.total_predictions, 1);

        let second =
            PredictionService::submit(&store, submission(None, 20), "10.0.0.2", window, now())
                .await
                .unwrap();
        assert_eq!(second.average_days, Some(15));
        assert_eq!(second.total_predictions, 2);
        assert_eq!(second.average_date, Some(now() + Duration::days(15)));
    }

    #[tokio::test]
    async fn test_submit_stores_hashed_ip_only() {
        let store = MemoryPredictionStore::default();

        PredictionService::submit(
            &store,
            submission(Some("bob"), 3),
            "203.0.113.7",
            Duration::minutes(5),
            now(),
        )
        .await
        .unwrap();

        let rows = store.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ip_hash, hash_ip("203.0.113.7"));
        assert_eq!(rows[0].predicted_date - rows[0].submitted_at, Duration::days(3));
    }

    #[tokio::test]
    async fn test_unrepresentable_window_fails_without_insert() {
        let store = MemoryPredictionStore::default();

        let err = PredictionService::submit(
            &store,
            submission(None, 1),
            "10.0.0.1",
            Duration::MAX,
            now(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert!(store.rows().await.is_empty());
    }

    #[tokio::test]
    async fn test_rate_limit_window_expires() {
        let store = MemoryPredictionStore::default();
        let window = Duration::minutes(5);

        PredictionService::submit(&store, submission(None, 1), "10.0.0.1", window, now())
            .await
            .unwrap();

        let err = PredictionService::submit(
            &store,
            submission(None, 2),
            "10.0.0.1",
            window,
            now() + Duration::minutes(4),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::TooManyRequests));

        let later = PredictionService::submit(
            &store,
            submission(None, 2),
            "10.0.0.1",
            window,
            now() + Duration::minutes(6),
        )
        .await
        .unwrap();
        assert_eq!(later.total_predictions, 2);
    }
}
