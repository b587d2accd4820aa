//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod cover;
#[allow(clippy::missing_errors_doc)]
pub mod threshold;
#[allow(clippy::missing_errors_doc)]
pub mod water;

use axum::Router;
use axum::routing::{get, post};

use aquahub_app::ports::RemoteDevice;

use crate::state::AppState;

/// Build the `/cover` sub-router.
pub fn cover_routes<R>() -> Router<AppState<R>>
where
    R: RemoteDevice + 'static,
{
    Router::new()
        .route("/open", post(cover::open::<R>))
        .route("/close", post(cover::close::<R>))
        .route("/status", get(cover::status::<R>))
}

/// Build the `/water` sub-router.
pub fn water_routes<R>() -> Router<AppState<R>>
where
    R: RemoteDevice + 'static,
{
    Router::new()
        .route("/supply", post(water::supply::<R>))
        .route("/refill", post(water::refill::<R>))
        .route("/reset", post(water::reset::<R>))
        .route("/status", get(water::status::<R>))
        .route(
            "/threshold",
            get(threshold::get::<R>).post(threshold::set::<R>),
        )
}
