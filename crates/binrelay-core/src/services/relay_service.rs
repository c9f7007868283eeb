//! The relay pipeline: validate, decode, dispatch, transcode.
//!
//! Each stage returns a `Result`; the first failure short-circuits and is
//! classified by [`RelayError`]. Transport causes are logged here and never
//! reach the caller.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::codec;
use crate::domain::{
    BinaryRelayResult, FileEntry, JSON_CONTENT_TYPE, MultiFileRelayRequest, MultiFileRelayResult,
    RelayKind, RelayRequest, UpstreamOutcome,
};
use crate::error::RelayError;
use crate::ports::{OutboundRequest, UpstreamDispatcher};
use crate::transcode::{outbound_content_type, transcode_binary, transcode_multi_file};
use crate::validation::{ValidationError, validate_multi_file_request, validate_relay_request};

/// Outbound JSON body of a multi-file relay.
#[derive(Serialize)]
struct UpstreamFilesBody<'a> {
    files: &'a [FileEntry],
}

/// Stateless relay pipeline shared by both operations.
///
/// Cheap to share behind an `Arc`; the only shared resource is whatever
/// connection pool the dispatcher holds.
pub struct RelayService {
    dispatcher: Arc<dyn UpstreamDispatcher>,
}

impl RelayService {
    pub fn new(dispatcher: Arc<dyn UpstreamDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Relay one base64 payload and return the upstream body re-encoded.
    pub async fn relay_binary(&self, body: &[u8]) -> Result<BinaryRelayResult, RelayError> {
        let request = validate_relay_request(body).inspect_err(log_rejection)?;
        let url = request.url.clone();
        self.forward_binary(request)
            .await
            .inspect_err(|e| log_failure(e, &url))
    }

    /// Relay a set of files as JSON and return the upstream archive re-encoded.
    pub async fn relay_multi_file(&self, body: &[u8]) -> Result<MultiFileRelayResult, RelayError> {
        let request = validate_multi_file_request(body).inspect_err(log_rejection)?;
        let url = request.url.clone();
        self.forward_multi_file(request)
            .await
            .inspect_err(|e| log_failure(e, &url))
    }

    async fn forward_binary(&self, request: RelayRequest) -> Result<BinaryRelayResult, RelayError> {
        let kind = RelayKind::Binary;
        let payload =
            codec::decode(&request.payload).map_err(|e| RelayError::transport(kind, e))?;

        debug!(
            relay = %kind,
            url = %request.url,
            bytes = payload.len(),
            "Dispatching binary relay"
        );

        let outbound = OutboundRequest {
            url: request.url.clone(),
            content_type: outbound_content_type(request.content_type.as_deref()).to_string(),
            body: Bytes::from(payload),
        };
        let outcome = self.dispatch(kind, outbound).await?;

        transcode_binary(&outcome, request.content_type.as_deref())
    }

    async fn forward_multi_file(
        &self,
        request: MultiFileRelayRequest,
    ) -> Result<MultiFileRelayResult, RelayError> {
        let kind = RelayKind::MultiFile;

        // Entries are forwarded still encoded, but must decode cleanly.
        for entry in &request.files {
            codec::decode(&entry.content).map_err(|e| {
                debug!(relay = %kind, filename = %entry.filename, "File content is not valid base64");
                RelayError::transport(kind, e)
            })?;
        }

        debug!(
            relay = %kind,
            url = %request.url,
            files = request.files.len(),
            "Dispatching multi-file relay"
        );

        let body = serde_json::to_vec(&UpstreamFilesBody {
            files: &request.files,
        })
        .map_err(|e| RelayError::transport(kind, e))?;

        let outbound = OutboundRequest {
            url: request.url,
            content_type: JSON_CONTENT_TYPE.to_string(),
            body: Bytes::from(body),
        };
        let outcome = self.dispatch(kind, outbound).await?;

        transcode_multi_file(&outcome)
    }

    async fn dispatch(
        &self,
        kind: RelayKind,
        outbound: OutboundRequest,
    ) -> Result<UpstreamOutcome, RelayError> {
        let outcome = self
            .dispatcher
            .dispatch(outbound)
            .await
            .map_err(|e| RelayError::transport(kind, e))?;

        debug!(
            relay = %kind,
            status = outcome.status,
            bytes = outcome.body.len(),
            "Upstream responded"
        );
        Ok(outcome)
    }
}

fn log_rejection(err: &ValidationError) {
    debug!(relay = %err.kind, issue = err.issue.as_str(), "Relay request rejected");
}

fn log_failure(err: &RelayError, url: &str) {
    let relay = err.kind();
    match err {
        RelayError::Upstream { status, .. } => {
            warn!(%relay, url = %url, status, "Upstream returned non-success status");
        }
        RelayError::Transport { source, .. } => {
            error!(%relay, url = %url, error = %source, "Relay transport failure");
        }
        RelayError::Validation(_) => {}
    }
}
