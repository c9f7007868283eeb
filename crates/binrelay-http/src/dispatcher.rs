//! reqwest implementation of the upstream port.
//!
//! One `dispatch` call is one POST. Non-2xx responses come back as outcomes
//! with an empty body; only failures to get a response at all are errors.

use async_trait::async_trait;
use binrelay_core::{
    DispatchError, OutboundRequest, UpstreamDispatcher, UpstreamHeaders, UpstreamOutcome,
};
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::redirect::Policy;
use tracing::debug;

use crate::config::DispatcherConfig;

/// Production dispatcher. Clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    client: reqwest::Client,
}

impl ReqwestDispatcher {
    /// Build a dispatcher with its own client.
    pub fn new(config: &DispatcherConfig) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .redirect(redirect_policy(config.max_redirects));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

fn redirect_policy(max_redirects: usize) -> Policy {
    if max_redirects == 0 {
        Policy::none()
    } else {
        Policy::limited(max_redirects)
    }
}

/// Render an error with its whole source chain, for operator logs.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn classify(err: &reqwest::Error) -> DispatchError {
    let detail = error_chain(err);
    if err.is_builder() {
        DispatchError::InvalidRequest(detail)
    } else if err.is_timeout() {
        DispatchError::Timeout(detail)
    } else if err.is_connect() {
        DispatchError::Connect(detail)
    } else if err.is_body() || err.is_decode() {
        DispatchError::Body(detail)
    } else {
        DispatchError::Other(detail)
    }
}

fn capture_headers(headers: &HeaderMap) -> UpstreamHeaders {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[async_trait]
impl UpstreamDispatcher for ReqwestDispatcher {
    async fn dispatch(&self, request: OutboundRequest) -> Result<UpstreamOutcome, DispatchError> {
        let response = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, request.content_type)
            .body(request.body)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let status = response.status();
        let headers = capture_headers(response.headers());

        if !status.is_success() {
            // The upstream body is discarded on failure.
            debug!(url = %request.url, status = status.as_u16(), "Upstream rejected relay");
            return Ok(UpstreamOutcome::new(status.as_u16(), headers, Bytes::new()));
        }

        let body = response.bytes().await.map_err(|e| classify_body(&e))?;
        Ok(UpstreamOutcome::new(status.as_u16(), headers, body))
    }
}

fn classify_body(err: &reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        DispatchError::Timeout(error_chain(err))
    } else {
        DispatchError::Body(error_chain(err))
    }
}
