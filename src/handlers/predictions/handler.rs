//! Prediction handler implementations

use axum::{
    Json,
    body::Body,
    extract::State,
    http::HeaderMap,
};

use crate::{
    constants::messages,
    error::AppResult,
    middleware::ClientIp,
    services::PredictionService,
    state::AppState,
    utils::now_utc,
};

use super::{
    request::{SubmitPredictionRequest, read_json_body},
    response::{AverageResponse, StatsResponse, SubmitPredictionResponse},
};

/// Submit a new prediction
pub async fn submit_prediction(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    headers: HeaderMap,
    body: Body,
) -> AppResult<Json<SubmitPredictionResponse>> {
    let payload = read_json_body(&headers, body).await?;
    let submission = SubmitPredictionRequest::from_json(&payload)?.into_submission()?;

    let summary = PredictionService::submit(
        state.store(),
        submission,
        &client_ip,
        state.config().rate_limit.window(),
        now_utc(),
    )
    .await?;

    Ok(Json(SubmitPredictionResponse::from(summary)))
}

/// Get the running average
pub async fn get_average(State(state): State<AppState>) -> AppResult<Json<AverageResponse>> {
    let summary = PredictionService::average(state.store(), now_utc())
        .await
        .map_err(|e| e.with_public_message(messages::AVERAGE_FAILED))?;

    Ok(Json(AverageResponse::from(summary)))
}

/// Get summary statistics
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = PredictionService::stats(state.store())
        .await
        .map_err(|e| e.with_public_message(messages::STATS_FAILED))?;

    Ok(Json(StatsResponse::from(stats)))
}
