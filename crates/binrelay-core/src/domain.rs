//! Request-scoped value types shared by both relay operations.
//!
//! Nothing here outlives a single request/response cycle.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Outbound content type used when neither the caller nor the upstream names one.
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Archive filename used when the upstream sends no usable `Content-Disposition`.
pub const DEFAULT_ARCHIVE_FILENAME: &str = "result.zip";

/// Content type of the multi-file outbound body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The two relay operations exposed by the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayKind {
    /// One blob in, one blob out.
    Binary,
    /// A set of named files in, one archive out.
    MultiFile,
}

impl RelayKind {
    /// Caller-visible message for a request that failed validation.
    pub const fn missing_fields_message(self) -> &'static str {
        match self {
            Self::Binary => "Missing url or image payload.",
            Self::MultiFile => "Missing url or files payload.",
        }
    }

    /// Caller-visible message for any transport-level failure.
    pub const fn unreachable_message(self) -> &'static str {
        match self {
            Self::Binary => "Could not reach the image API.",
            Self::MultiFile => "Could not reach the zip API.",
        }
    }

    /// Short label used in log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "image",
            Self::MultiFile => "zip",
        }
    }
}

impl std::fmt::Display for RelayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated single-payload relay request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    /// Upstream endpoint, guaranteed non-empty.
    pub url: String,
    /// Base64 payload, guaranteed non-empty.
    pub payload: String,
    /// Caller-declared content type. Empty strings are normalized to `None`.
    pub content_type: Option<String>,
}

/// One named file of a multi-file relay.
///
/// `content` stays base64 encoded end to end. Every other member of the
/// entry, `size` included, is kept in `extra` and forwarded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileEntry {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// The optional `size` member, when it is a number.
    pub fn size(&self) -> Option<&serde_json::Number> {
        match self.extra.get("size") {
            Some(serde_json::Value::Number(n)) => Some(n),
            _ => None,
        }
    }
}

/// A validated multi-file relay request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiFileRelayRequest {
    /// Upstream endpoint, guaranteed non-empty.
    pub url: String,
    /// Files in caller order, guaranteed non-empty.
    pub files: Vec<FileEntry>,
}

/// Response headers captured from the upstream.
///
/// Names are stored lowercased so lookups are case-insensitive. Repeated
/// headers are folded into one comma-separated value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamHeaders(BTreeMap<String, String>);

impl UpstreamHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.0
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    /// Look up a header by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for UpstreamHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value);
        }
        headers
    }
}

/// Captured result of one dispatch attempt.
///
/// A non-2xx status is still an outcome. Only transport failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamOutcome {
    pub status: u16,
    pub headers: UpstreamHeaders,
    /// Raw response body. Empty when the upstream did not succeed.
    pub body: Bytes,
}

impl UpstreamOutcome {
    pub fn new(status: u16, headers: UpstreamHeaders, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Whether the upstream status is in `[200, 300)`.
    pub const fn succeeded(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

/// Successful single-payload relay response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryRelayResult {
    /// Base64 of the upstream response body.
    pub result: String,
    pub content_type: String,
}

/// Successful multi-file relay response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFileRelayResult {
    /// Base64 of the upstream archive bytes.
    pub zip: String,
    pub filename: String,
}
