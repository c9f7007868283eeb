//! Port definitions for the outbound side of the relay.
//!
//! The core never talks HTTP itself. Adapters implement [`UpstreamDispatcher`]
//! and the [`RelayService`](crate::services::RelayService) drives it.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::UpstreamOutcome;

/// A fully framed outbound POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: String,
    /// Value for the outbound `Content-Type` header.
    pub content_type: String,
    pub body: Bytes,
}

/// A dispatch attempt that produced no HTTP response at all.
///
/// Non-2xx statuses are not errors; they come back as an
/// [`UpstreamOutcome`] with `succeeded() == false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request could not be built (bad URL, bad header value).
    #[error("Invalid upstream request: {0}")]
    InvalidRequest(String),

    /// DNS, connection refused, TLS handshake.
    #[error("Could not connect to upstream: {0}")]
    Connect(String),

    /// The deployment-level timeout elapsed.
    #[error("Upstream request timed out: {0}")]
    Timeout(String),

    /// The response started but its body could not be read.
    #[error("Failed to read upstream response: {0}")]
    Body(String),

    /// Any other transport or protocol fault.
    #[error("Upstream transport error: {0}")]
    Other(String),
}

/// Issues exactly one outbound request per call and captures the response.
///
/// Implementations must not retry.
#[async_trait]
pub trait UpstreamDispatcher: Send + Sync {
    async fn dispatch(&self, request: OutboundRequest) -> Result<UpstreamOutcome, DispatchError>;
}
