//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use aquahub_app::ports::RemoteDevice;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests cover routes under `/cover` and reservoir/threshold routes under
/// `/water`. Includes a [`TraceLayer`] that logs each HTTP request/response
/// at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: RemoteDevice + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/cover", crate::api::cover_routes())
        .nest("/water", crate::api::water_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
