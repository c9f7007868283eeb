//! Production [`UpstreamDispatcher`](binrelay_core::UpstreamDispatcher) backed by reqwest.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod config;
mod dispatcher;

// ============================================================================
// Public API
// ============================================================================

pub use config::{DEFAULT_MAX_REDIRECTS, DEFAULT_POOL_MAX_IDLE_PER_HOST, DispatcherConfig};
pub use dispatcher::ReqwestDispatcher;

// Silence unused dev-dependency warnings in unit test builds
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use tokio_test as _;
