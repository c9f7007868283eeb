//! Core of the binrelay forwarding-and-transcoding proxy.
//!
//! The crate holds everything that does not depend on a concrete HTTP
//! client or web framework:
//!
//! - [`domain`]: request-scoped value types for both relay operations
//! - [`codec`]: base64 transport encoding on the JSON boundary
//! - [`validation`]: inbound body validation
//! - [`ports`]: the [`UpstreamDispatcher`] trait adapters implement
//! - [`transcode`]: upstream outcome to caller-facing result mapping
//! - [`services`]: the [`RelayService`] pipeline tying the above together
#![deny(unused_crate_dependencies)]

pub mod codec;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod transcode;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use codec::CodecError;
pub use domain::{
    BinaryRelayResult, DEFAULT_ARCHIVE_FILENAME, DEFAULT_CONTENT_TYPE, FileEntry,
    JSON_CONTENT_TYPE, MultiFileRelayRequest, MultiFileRelayResult, RelayKind, RelayRequest,
    UpstreamHeaders, UpstreamOutcome,
};
pub use error::{ErrorClass, RelayError, TransportError};
pub use ports::{DispatchError, OutboundRequest, UpstreamDispatcher};
pub use services::RelayService;
pub use validation::{ValidationError, ValidationIssue};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
