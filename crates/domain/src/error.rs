//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`AquaHubError`] via `#[from]`. Only [`AquaHubError::Remote`] involves
//! the controller; the other two are decided locally.

use std::fmt;

use crate::endpoint::Endpoint;

/// Top-level error returned by every coordinator operation.
#[derive(Debug, thiserror::Error)]
pub enum AquaHubError {
    /// The command parameters are malformed or out of range.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The command is well-formed but conflicts with the current shadow state.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    /// The remote controller could not confirm the command.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl AquaHubError {
    /// Whether the error was resolved locally, without reaching the controller.
    #[must_use]
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Remote(_))
    }
}

/// Malformed or out-of-range command parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A supply amount must be strictly positive.
    #[error("supply amount must be positive, got {amount}")]
    NonPositiveAmount { amount: i64 },

    /// A supply amount does not fit the reservoir's volume type.
    #[error("supply amount {amount} exceeds the representable volume")]
    AmountTooLarge { amount: i64 },

    /// A threshold must lie in `min..=max`.
    #[error("threshold must be between {min} and {max}, got {value}")]
    ThresholdOutOfRange { value: i64, min: u16, max: u16 },

    /// A reservoir must be able to hold some water.
    #[error("reservoir capacity must be positive")]
    ZeroCapacity,
}

/// A well-formed command that is inconsistent with the committed state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("cover is already open")]
    AlreadyOpen,

    #[error("cover is already closed")]
    AlreadyClosed,

    /// Not enough water left for the requested supply.
    #[error("insufficient volume: requested {requested} liters, {remaining} remaining")]
    InsufficientVolume { requested: u32, remaining: u32 },
}

/// How a remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// No response within the configured timeout.
    Timeout,
    /// The controller could not be reached.
    ConnectionRefused,
    /// The controller answered with a non-success status, or the exchange
    /// broke down after the connection was established.
    RemoteFault { status: Option<u16> },
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out"),
            Self::ConnectionRefused => f.write_str("connection refused"),
            Self::RemoteFault { status: Some(status) } => {
                write!(f, "controller responded with status {status}")
            }
            Self::RemoteFault { status: None } => f.write_str("controller fault"),
        }
    }
}

/// Failure of a single exchange with the remote controller.
#[derive(Debug, thiserror::Error)]
#[error("remote call to `{endpoint}` failed: {kind}")]
pub struct RemoteError {
    pub endpoint: Endpoint,
    pub kind: RemoteErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RemoteError {
    /// Build an error without an underlying cause.
    #[must_use]
    pub fn new(endpoint: Endpoint, kind: RemoteErrorKind) -> Self {
        Self {
            endpoint,
            kind,
            source: None,
        }
    }

    /// Attach the underlying transport error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_insufficient_volume_with_amounts() {
        let err = InvariantViolation::InsufficientVolume {
            requested: 80,
            remaining: 70,
        };
        assert_eq!(
            err.to_string(),
            "insufficient volume: requested 80 liters, 70 remaining"
        );
    }

    #[test]
    fn should_display_threshold_range() {
        let err = ValidationError::ThresholdOutOfRange {
            value: 0,
            min: 1,
            max: 1023,
        };
        assert_eq!(err.to_string(), "threshold must be between 1 and 1023, got 0");
    }

    #[test]
    fn should_display_remote_error_with_endpoint_and_kind() {
        let err = RemoteError::new(
            Endpoint::SetThreshold,
            RemoteErrorKind::RemoteFault { status: Some(500) },
        );
        assert_eq!(
            err.to_string(),
            "remote call to `set-threshold` failed: controller responded with status 500"
        );
    }

    #[test]
    fn should_be_transparent_when_wrapped() {
        let err: AquaHubError = InvariantViolation::AlreadyOpen.into();
        assert_eq!(err.to_string(), "cover is already open");
        assert!(err.is_local());
    }

    #[test]
    fn should_not_be_local_when_remote() {
        let err: AquaHubError = RemoteError::new(Endpoint::Open, RemoteErrorKind::Timeout).into();
        assert!(!err.is_local());
    }

    #[test]
    fn should_expose_source_when_attached() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RemoteError::new(Endpoint::Status, RemoteErrorKind::ConnectionRefused)
            .with_source(io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
