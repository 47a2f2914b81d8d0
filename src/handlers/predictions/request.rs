//! Prediction request DTOs

use axum::{
    body::Body,
    http::{HeaderMap, header::CONTENT_LENGTH, header::CONTENT_TYPE},
};
use serde_json::Value;
use validator::Validate;

use crate::{
    constants::{
        MAX_DAYS_UNTIL_POP, MAX_REQUEST_SIZE, MAX_USERNAME_LENGTH, MIN_DAYS_UNTIL_POP, messages,
    },
    error::{AppError, AppResult},
    services::Submission,
};

/// Read a small JSON body.
///
/// Rejects a missing or non-JSON `Content-Type`, then any body whose declared
/// or actual size exceeds [`MAX_REQUEST_SIZE`], then malformed JSON.
pub async fn read_json_body(headers: &HeaderMap, body: Body) -> AppResult<Value> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if !is_json {
        return Err(AppError::InvalidContentType);
    }

    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    if declared.is_some_and(|len| len > MAX_REQUEST_SIZE as u64) {
        return Err(AppError::PayloadTooLarge);
    }

    let bytes = axum::body::to_bytes(body, MAX_REQUEST_SIZE)
        .await
        .map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            AppError::PayloadTooLarge
        })?;

    serde_json::from_slice(&bytes).map_err(|_| AppError::validation(messages::INVALID_INPUT))
}

/// Submit prediction request
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SubmitPredictionRequest {
    /// Already trimmed
    #[validate(length(max = MAX_USERNAME_LENGTH))]
    pub username: Option<String>,

    #[validate(range(min = MIN_DAYS_UNTIL_POP, max = MAX_DAYS_UNTIL_POP))]
    pub days_until_pop: i64,
}

impl SubmitPredictionRequest {
    /// Pull `daysUntilPop` and `username` out of a JSON body.
    ///
    /// Checks run in order: `daysUntilPop` type, its range, then `username`
    /// type. `daysUntilPop` must be a number with an integral value (`7.0`
    /// counts). `username` may be absent, `null`, or a string without NUL
    /// characters, which PostgreSQL text cannot hold.
    pub fn from_json(body: &Value) -> AppResult<Self> {
        let invalid = || AppError::validation(messages::INVALID_INPUT);

        let days_until_pop = body
            .get("daysUntilPop")
            .and_then(integral_number)
            .ok_or_else(invalid)?;

        if !(MIN_DAYS_UNTIL_POP..=MAX_DAYS_UNTIL_POP).contains(&days_until_pop) {
            return Err(AppError::validation(messages::INVALID_DAYS));
        }

        let username = match body.get("username") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) if !name.contains('\0') => Some(name.trim().to_string()),
            Some(_) => return Err(invalid()),
        };

        Ok(Self {
            username,
            days_until_pop,
        })
    }

    /// Check lengths and ranges and produce a storable submission
    pub fn into_submission(self) -> AppResult<Submission> {
        if let Err(errors) = self.validate() {
            let fields = errors.field_errors();
            return Err(if fields.contains_key("days_until_pop") {
                AppError::validation(messages::INVALID_DAYS)
            } else if fields.contains_key("username") {
                AppError::validation(messages::USERNAME_TOO_LONG)
            } else {
                AppError::from(errors)
            });
        }

        let days_until_pop = i32::try_from(self.days_until_pop)
            .map_err(|_| AppError::validation(messages::INVALID_DAYS))?;

        Ok(Submission {
            username: self.username.filter(|name| !name.is_empty()),
            days_until_pop,
        })
    }
}

/// An integer, or a float with no fractional part. Out-of-range floats
/// saturate so they fail the range check rather than the type check.
fn integral_number(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(int) = number.as_i64() {
        return Some(int);
    }

    let float = number.as_f64()?;
    (float.fract() == 0.0).then_some(float as i64)
}
