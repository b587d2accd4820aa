//! # aquahub-adapter-remote-http
//!
//! Driven adapter for the hardware controller, built on
//! [reqwest](https://docs.rs/reqwest).
//!
//! ## Wire protocol
//!
//! | Endpoint | Method | Body |
//! |----------|--------|------|
//! | `open`, `close`, `refill`, `reset` | `POST` | – |
//! | `supply` | `POST` | `{"amount": n}` |
//! | `set-threshold` | `POST` | `{"threshold": n}` |
//! | `status` | `GET` | – |
//!
//! Responses are passed through untouched: JSON bodies as JSON, anything
//! else as a JSON string, an empty body as `null`.
//!
//! ## Dependency rule
//! Depends on `aquahub-app` (port trait) and `aquahub-domain` only.

pub mod config;
pub mod error;

use aquahub_app::ports::RemoteDevice;
use aquahub_domain::endpoint::Endpoint;
use aquahub_domain::error::RemoteError;

pub use config::ControllerConfig;
pub use error::RemoteHttpError;

/// [`RemoteDevice`] implementation speaking plain HTTP to the controller.
#[derive(Debug, Clone)]
pub struct HttpRemoteDevice {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteDevice {
    /// Build a client for the configured controller.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteHttpError::Build`] if the underlying HTTP client
    /// cannot be created.
    pub fn new(config: &ControllerConfig) -> Result<Self, RemoteHttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(RemoteHttpError::Build)?;
        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    /// Controller base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    async fn exchange(
        &self,
        endpoint: Endpoint,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, RemoteHttpError> {
        let url = self.url(endpoint);
        let request = if endpoint.is_query() {
            self.client.get(url)
        } else {
            self.client.post(url)
        };
        let request = match payload {
            Some(body) => request.json(&body),
            None => request,
        };

        let response = request.send().await.map_err(RemoteHttpError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteHttpError::Status(status));
        }
        let body = response.bytes().await.map_err(RemoteHttpError::Request)?;
        Ok(decode_body(&body))
    }
}

impl RemoteDevice for HttpRemoteDevice {
    async fn send(
        &self,
        endpoint: Endpoint,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, RemoteError> {
        let method = if endpoint.is_query() { "GET" } else { "POST" };
        tracing::debug!(%endpoint, method, "calling controller");
        self.exchange(endpoint, payload).await.map_err(|err| {
            let err = err.into_remote(endpoint);
            tracing::warn!(%endpoint, kind = %err.kind, "controller call failed");
            err
        })
    }
}

fn decode_body(body: &[u8]) -> serde_json::Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(body).trim().to_string())
    })
}
