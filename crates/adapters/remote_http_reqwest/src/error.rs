//! Remote HTTP adapter error types.

use aquahub_domain::endpoint::Endpoint;
use aquahub_domain::error::{RemoteError, RemoteErrorKind};

/// Errors specific to the reqwest-based controller client.
#[derive(Debug, thiserror::Error)]
pub enum RemoteHttpError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or its response could not be read.
    #[error("HTTP request failed")]
    Request(#[source] reqwest::Error),

    /// The controller answered with a non-success status.
    #[error("controller responded with status {0}")]
    Status(reqwest::StatusCode),
}

impl RemoteHttpError {
    /// Classify into the kind the rest of the system understands.
    #[must_use]
    pub fn kind(&self) -> RemoteErrorKind {
        match self {
            Self::Request(err) if err.is_timeout() => RemoteErrorKind::Timeout,
            Self::Request(err) if err.is_connect() => RemoteErrorKind::ConnectionRefused,
            Self::Request(err) => RemoteErrorKind::RemoteFault {
                status: err.status().map(|s| s.as_u16()),
            },
            Self::Status(status) => RemoteErrorKind::RemoteFault {
                status: Some(status.as_u16()),
            },
            Self::Build(_) => RemoteErrorKind::RemoteFault { status: None },
        }
    }

    /// Convert into a [`RemoteError`] for propagation across the port
    /// boundary.
    #[must_use]
    pub fn into_remote(self, endpoint: Endpoint) -> RemoteError {
        let kind = self.kind();
        RemoteError::new(endpoint, kind).with_source(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_status_as_remote_fault() {
        let err = RemoteHttpError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.kind(), RemoteErrorKind::RemoteFault { status: Some(503) });
    }

    #[test]
    fn should_display_status_error() {
        let err = RemoteHttpError::Status(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "controller responded with status 404 Not Found");
    }

    #[test]
    fn should_keep_endpoint_and_source_when_converted() {
        let err = RemoteHttpError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
            .into_remote(Endpoint::Refill);
        assert_eq!(err.endpoint, Endpoint::Refill);
        assert!(err.source.is_some());
    }
}
