//! Test doubles for the upstream port.
//!
//! Available to this crate's tests and, through the `test-utils` feature, to
//! adapter crates.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{UpstreamHeaders, UpstreamOutcome};
use crate::ports::{DispatchError, OutboundRequest, UpstreamDispatcher};

/// A dispatcher that returns one canned answer and records every request.
pub struct FakeDispatcher {
    response: Result<UpstreamOutcome, DispatchError>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl FakeDispatcher {
    /// Answer every dispatch with `outcome`.
    pub fn responding(outcome: UpstreamOutcome) -> Self {
        Self {
            response: Ok(outcome),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every dispatch with `status`, the given headers and body.
    pub fn with_status(status: u16, headers: &[(&str, &str)], body: impl Into<Bytes>) -> Self {
        let headers: UpstreamHeaders = headers.iter().copied().collect();
        Self::responding(UpstreamOutcome::new(status, headers, body))
    }

    /// Fail every dispatch with `error`.
    pub fn failing(error: DispatchError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, in dispatch order.
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamDispatcher for FakeDispatcher {
    async fn dispatch(&self, request: OutboundRequest) -> Result<UpstreamOutcome, DispatchError> {
        self.requests.lock().unwrap().push(request);
        self.response.clone()
    }
}
