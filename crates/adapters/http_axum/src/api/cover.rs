//! JSON handlers for the cover.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use aquahub_app::coordinator::Outcome;
use aquahub_app::ports::RemoteDevice;
use aquahub_domain::cover::CoverState;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned after a confirmed open or close.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverCommandResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub new_state: CoverState,
    pub remote_response: serde_json::Value,
}

impl From<Outcome<CoverState>> for CoverCommandResponse {
    fn from(outcome: Outcome<CoverState>) -> Self {
        Self {
            message: outcome.message,
            status: outcome.new_state.label(),
            new_state: outcome.new_state,
            remote_response: outcome.remote_response,
        }
    }
}

/// Body returned by `GET /cover/status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverStatusResponse {
    pub is_open: bool,
    pub status: &'static str,
    pub remote_status: serde_json::Value,
}

/// `POST /cover/open`
pub async fn open<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<CoverCommandResponse>, ApiError>
where
    R: RemoteDevice + 'static,
{
    let outcome = state.coordinator.open_cover().await?;
    Ok(Json(outcome.into()))
}

/// `POST /cover/close`
pub async fn close<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<CoverCommandResponse>, ApiError>
where
    R: RemoteDevice + 'static,
{
    let outcome = state.coordinator.close_cover().await?;
    Ok(Json(outcome.into()))
}

/// `GET /cover/status`
pub async fn status<R>(
    State(state): State<AppState<R>>,
) -> Result<Json<CoverStatusResponse>, ApiError>
where
    R: RemoteDevice + 'static,
{
    let report = state.coordinator.cover_status().await?;
    Ok(Json(CoverStatusResponse {
        is_open: report.local.is_open,
        status: report.local.label(),
        remote_status: report.remote,
    }))
}
