//! JSON handlers for the reservoir.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use aquahub_app::coordinator::Outcome;
use aquahub_app::ports::RemoteDevice;
use aquahub_domain::reservoir::{ReservoirState, UNIT};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /water/supply`.
#[derive(Debug, Deserialize)]
pub struct SupplyRequest {
    pub amount: i64,
}

/// Body returned after a confirmed supply.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyResponse {
    pub message: &'static str,
    pub supplied: i64,
    pub remaining: u32,
    pub unit: &'static str,
    pub new_state: ReservoirState,
    pub remote_response: serde_json::Value,
}

/// Body returned after a confirmed refill or reset.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservoirCommandResponse {
    pub message: &'static str,
    pub remaining: u32,
    pub unit: &'static str,
    pub new_state: ReservoirState,
    pub remote_response: serde_json::Value,
}

impl From<Outcome<ReservoirState>> for ReservoirCommandResponse {
    fn from(outcome: Outcome<ReservoirState>) -> Self {
        Self {
            message: outcome.message,
            remaining: outcome.new_state.current_level,
            unit: UNIT,
            new_state: outcome.new_state,
            remote_response: outcome.remote_response,
        }
    }
}

/// Body returned by `GET /water/status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterStatusResponse {
    pub current_water_level: u32,
    pub max_water_capacity: u32,
    pub threshold: u16,
    pub unit: &'static str,
    pub remote_status: serde_json::Value,
}

/// `POST /water/supply`
pub async fn supply<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<SupplyRequest>, JsonRejection>,
) -> Result<Json<SupplyResponse>, ApiError>
where
    R: RemoteDevice + 'static,
{
    let Json(req) = body?;
    let outcome = state.coordinator.supply(req.amount).await?;
    Ok(Json(SupplyResponse {
        message: outcome.message,
        supplied: req.amount,
        remaining: outcome.new_state.current_level,
        unit: UNIT,
        new_state: outcome.new_state,
        remote_response: outcome.remote_response,
    }))
}

/// `POST /water/refill`
pub async fn refill<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<ReservoirCommandResponse>, ApiError>
where
    R: RemoteDevice + 'static,
{
    let outcome = state.coordinator.refill().await?;
    Ok(Json(outcome.into()))
}

/// `POST /water/reset`
pub async fn reset<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<ReservoirCommandResponse>, ApiError>
where
    R: RemoteDevice + 'static,
{
    let outcome = state.coordinator.reset_reservoir().await?;
    Ok(Json(outcome.into()))
}

/// `GET /water/status`
pub async fn status<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<WaterStatusResponse>, ApiError>
where
    R: RemoteDevice + 'static,
{
    let report = state.coordinator.reservoir_status().await?;
    let threshold = state.coordinator.threshold().await;
    Ok(Json(WaterStatusResponse {
        current_water_level: report.local.current_level,
        max_water_capacity: report.local.capacity,
        threshold: threshold.value,
        unit: UNIT,
        remote_status: report.remote,
    }))
}
