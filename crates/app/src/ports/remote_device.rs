//! Remote device port: request/response exchange with the physical controller.

use std::future::Future;
use std::sync::Arc;

use aquahub_domain::endpoint::Endpoint;
use aquahub_domain::error::RemoteError;

/// The hardware controller, reachable over the network.
///
/// Implementations hold no state of their own and never retry: one call is
/// one exchange. The response body is returned as-is, without interpretation.
pub trait RemoteDevice: Send + Sync {
    /// Send `payload` (if any) to `endpoint` and return the decoded response.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] when the controller times out, cannot be
    /// reached, or answers with a non-success status.
    fn send(
        &self,
        endpoint: Endpoint,
        payload: Option<serde_json::Value>,
    ) -> impl Future<Output = Result<serde_json::Value, RemoteError>> + Send;
}

impl<T: RemoteDevice> RemoteDevice for Arc<T> {
    fn send(
        &self,
        endpoint: Endpoint,
        payload: Option<serde_json::Value>,
    ) -> impl Future<Output = Result<serde_json::Value, RemoteError>> + Send {
        T::send(self, endpoint, payload)
    }
}
