//! Mapping of relay failures to HTTP responses.
//!
//! Every error body has the single shape `{ "message": "..." }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use binrelay_core::{ErrorClass, RelayError};
use serde::Serialize;
use thiserror::Error;

/// Axum-facing error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Validation failure.
    #[error("{0}")]
    BadRequest(String),

    /// The upstream answered with a non-success status.
    #[error("{0}")]
    BadGateway(String),

    /// Transport failure. The message is already sanitized.
    #[error("{0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::BadGateway(msg) | Self::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.message().to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<RelayError> for HttpError {
    fn from(err: RelayError) -> Self {
        let message = err.message();
        match err.class() {
            ErrorClass::ValidationFailure => Self::BadRequest(message),
            ErrorClass::UpstreamFailure => Self::BadGateway(message),
            ErrorClass::TransportFailure => Self::Internal(message),
        }
    }
}
