//! Inbound body validation for both relay operations.
//!
//! Validation is a single synchronous pass over the raw request body. A body
//! that is not JSON at all fails the same way as one missing a field, so the
//! caller always sees the operation's fixed "Missing ..." message.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{FileEntry, MultiFileRelayRequest, RelayKind, RelayRequest};

/// What exactly was wrong with a rejected body. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The body was not a JSON object of the expected shape.
    MalformedBody,
    MissingUrl,
    MissingPayload,
    MissingFiles,
}

impl ValidationIssue {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedBody => "malformed body",
            Self::MissingUrl => "missing url",
            Self::MissingPayload => "missing payload",
            Self::MissingFiles => "missing files",
        }
    }
}

/// A request rejected before any network I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .kind.missing_fields_message())]
pub struct ValidationError {
    pub kind: RelayKind,
    pub issue: ValidationIssue,
}

impl ValidationError {
    const fn new(kind: RelayKind, issue: ValidationIssue) -> Self {
        Self { kind, issue }
    }
}

/// Wire shape of a single-payload request before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRelayRequest {
    url: Option<String>,
    payload: Option<String>,
    /// Field name used by older web clients.
    image: Option<String>,
    content_type: Option<String>,
}

/// Wire shape of a multi-file request before validation.
#[derive(Debug, Default, Deserialize)]
struct RawMultiFileRelayRequest {
    url: Option<String>,
    files: Option<Vec<FileEntry>>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validate a single-payload relay body.
///
/// `payload` takes precedence over the legacy `image` field when both are set.
pub fn validate_relay_request(body: &[u8]) -> Result<RelayRequest, ValidationError> {
    let kind = RelayKind::Binary;
    let raw: RawRelayRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(relay = %kind, error = %e, "Rejecting unparseable relay body");
        ValidationError::new(kind, ValidationIssue::MalformedBody)
    })?;

    let url = non_empty(raw.url).ok_or(ValidationError::new(kind, ValidationIssue::MissingUrl))?;
    let payload = non_empty(raw.payload)
        .or_else(|| non_empty(raw.image))
        .ok_or(ValidationError::new(kind, ValidationIssue::MissingPayload))?;

    Ok(RelayRequest {
        url,
        payload,
        content_type: non_empty(raw.content_type),
    })
}

/// Validate a multi-file relay body.
pub fn validate_multi_file_request(body: &[u8]) -> Result<MultiFileRelayRequest, ValidationError> {
    let kind = RelayKind::MultiFile;
    let raw: RawMultiFileRelayRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(relay = %kind, error = %e, "Rejecting unparseable relay body");
        ValidationError::new(kind, ValidationIssue::MalformedBody)
    })?;

    let url = non_empty(raw.url).ok_or(ValidationError::new(kind, ValidationIssue::MissingUrl))?;
    let files = raw
        .files
        .filter(|files| !files.is_empty())
        .ok_or(ValidationError::new(kind, ValidationIssue::MissingFiles))?;

    Ok(MultiFileRelayRequest { url, files })
}
