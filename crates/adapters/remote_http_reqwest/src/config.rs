//! Remote controller configuration.

use std::time::Duration;

use serde::Deserialize;

/// Where the hardware controller lives and how long to wait for it.
///
/// Resolved once at startup and never changed at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Controller hostname or IP address.
    pub host: String,
    /// Controller HTTP port.
    pub port: u16,
    /// Total time allowed for one request/response exchange, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: "192.168.219.180".to_string(),
            port: 3001,
            timeout_ms: 5000,
        }
    }
}

impl ControllerConfig {
    /// `http://host:port`, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
