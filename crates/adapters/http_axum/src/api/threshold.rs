//! JSON handlers for the trigger threshold.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use aquahub_app::ports::RemoteDevice;
use aquahub_domain::threshold::ThresholdState;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /water/threshold`.
#[derive(Debug, Deserialize)]
pub struct SetThresholdRequest {
    pub threshold: i64,
}

/// Body returned after a confirmed threshold change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetThresholdResponse {
    pub message: &'static str,
    pub new_threshold: u16,
    pub new_state: ThresholdState,
    pub remote_response: serde_json::Value,
}

/// Body returned by `GET /water/threshold`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentThresholdResponse {
    pub message: &'static str,
    pub current_threshold: u16,
}

/// `POST /water/threshold`
pub async fn set<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<SetThresholdRequest>, JsonRejection>,
) -> Result<Json<SetThresholdResponse>, ApiError>
where
    R: RemoteDevice + 'static,
{
    let Json(req) = body?;
    let outcome = state.coordinator.set_threshold(req.threshold).await?;
    Ok(Json(SetThresholdResponse {
        message: outcome.message,
        new_threshold: outcome.new_state.value,
        new_state: outcome.new_state,
        remote_response: outcome.remote_response,
    }))
}

/// `GET /water/threshold`
///
/// Answered from the shadow state alone.
pub async fn get<R>(State(state): State<AppState<R>>) -> Json<CurrentThresholdResponse>
where
    R: RemoteDevice + 'static,
{
    let current = state.coordinator.threshold().await;
    Json(CurrentThresholdResponse {
        message: "current threshold",
        current_threshold: current.value,
    })
}
