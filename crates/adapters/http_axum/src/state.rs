//! Shared application state for axum handlers.

use std::sync::Arc;

use aquahub_app::coordinator::StateCoordinator;
use aquahub_app::ports::RemoteDevice;

/// Application state shared across all axum handlers.
///
/// Generic over the remote device to avoid dynamic dispatch. `Clone` is
/// implemented manually so `R` itself does not need to be `Clone`, only
/// the `Arc` is cloned.
pub struct AppState<R> {
    /// Owner of every shadow state.
    pub coordinator: Arc<StateCoordinator<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl<R> AppState<R>
where
    R: RemoteDevice + 'static,
{
    /// Create a new application state around a coordinator.
    pub fn new(coordinator: StateCoordinator<R>) -> Self {
        Self::from_arc(Arc::new(coordinator))
    }

    /// Create a new application state from a coordinator that is already
    /// shared elsewhere.
    pub fn from_arc(coordinator: Arc<StateCoordinator<R>>) -> Self {
        Self { coordinator }
    }
}
