//! Relay error taxonomy.
//!
//! Every failure a relay can hit is one of three classes. The class decides
//! the HTTP status; `Display` renders the exact caller-visible message.

use thiserror::Error;

use crate::codec::CodecError;
use crate::domain::RelayKind;
use crate::ports::DispatchError;
use crate::validation::ValidationError;

/// Caller-facing failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing or empty required field, or unparseable body.
    ValidationFailure,
    /// The upstream answered with a non-2xx status.
    UpstreamFailure,
    /// Decode, dispatch or encode failed.
    TransportFailure,
}

impl ErrorClass {
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationFailure => 400,
            Self::UpstreamFailure => 502,
            Self::TransportFailure => 500,
        }
    }
}

/// Underlying cause of a transport failure. Never shown to callers.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Decode(#[from] CodecError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Failed to serialize upstream body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A failed relay, ready to be rendered as `{ "message": ... }`.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The upstream body is discarded; only the status survives.
    #[error("Upstream request failed with {status}.")]
    Upstream { kind: RelayKind, status: u16 },

    #[error("{}", .kind.unreachable_message())]
    Transport {
        kind: RelayKind,
        #[source]
        source: TransportError,
    },
}

impl RelayError {
    pub fn transport(kind: RelayKind, source: impl Into<TransportError>) -> Self {
        Self::Transport {
            kind,
            source: source.into(),
        }
    }

    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::ValidationFailure,
            Self::Upstream { .. } => ErrorClass::UpstreamFailure,
            Self::Transport { .. } => ErrorClass::TransportFailure,
        }
    }

    pub const fn kind(&self) -> RelayKind {
        match self {
            Self::Validation(err) => err.kind,
            Self::Upstream { kind, .. } | Self::Transport { kind, .. } => *kind,
        }
    }

    /// The message returned to the caller.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationIssue;
    use std::error::Error as _;

    #[test]
    fn test_class_statuses() {
        assert_eq!(ErrorClass::ValidationFailure.http_status(), 400);
        assert_eq!(ErrorClass::UpstreamFailure.http_status(), 502);
        assert_eq!(ErrorClass::TransportFailure.http_status(), 500);
    }

    #[test]
    fn test_upstream_message_names_status() {
        let err = RelayError::Upstream {
            kind: RelayKind::MultiFile,
            status: 503,
        };
        assert_eq!(err.message(), "Upstream request failed with 503.");
        assert_eq!(err.class(), ErrorClass::UpstreamFailure);
    }

    #[test]
    fn test_transport_message_hides_cause() {
        let err = RelayError::transport(
            RelayKind::Binary,
            DispatchError::Connect("tcp connect error: Connection refused".to_string()),
        );
        assert_eq!(err.message(), "Could not reach the image API.");
        assert!(!err.message().contains("refused"));

        let cause = err.source().unwrap().to_string();
        assert!(cause.contains("Connection refused"));
    }

    #[test]
    fn test_validation_maps_to_kind_message() {
        let err: RelayError = ValidationError {
            kind: RelayKind::MultiFile,
            issue: ValidationIssue::MissingFiles,
        }
        .into();
        assert_eq!(err.class(), ErrorClass::ValidationFailure);
        assert_eq!(err.kind(), RelayKind::MultiFile);
        assert_eq!(err.message(), "Missing url or files payload.");
    }
}
