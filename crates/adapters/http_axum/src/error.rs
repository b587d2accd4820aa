//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use aquahub_domain::error::AquaHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`AquaHubError`] and request body rejections to an HTTP response
/// with appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// Error raised by the coordinator.
    Domain(AquaHubError),
    /// Missing, malformed or mistyped JSON body.
    Body(JsonRejection),
}

impl From<AquaHubError> for ApiError {
    fn from(err: AquaHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(
                err @ (AquaHubError::Validation(_) | AquaHubError::Invariant(_)),
            ) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Domain(AquaHubError::Remote(err)) => {
                tracing::error!(error = %err, kind = %err.kind, "remote controller error");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            Self::Body(rejection) => {
                tracing::debug!(error = %rejection, "request body rejected");
                (StatusCode::BAD_REQUEST, rejection.body_text())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquahub_domain::endpoint::Endpoint;
    use aquahub_domain::error::{
        InvariantViolation, RemoteError, RemoteErrorKind, ValidationError,
    };

    fn status_of(err: impl Into<AquaHubError>) -> StatusCode {
        let err: AquaHubError = err.into();
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_validation_to_bad_request() {
        let err = ValidationError::NonPositiveAmount { amount: -1 };
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_invariant_to_bad_request() {
        assert_eq!(
            status_of(InvariantViolation::AlreadyClosed),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn should_map_remote_to_bad_gateway() {
        let err = RemoteError::new(Endpoint::Open, RemoteErrorKind::ConnectionRefused);
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }
}
