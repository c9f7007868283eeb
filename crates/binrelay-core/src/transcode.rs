//! Mapping of upstream outcomes into caller-facing results.
//!
//! Fallback chains are ordered candidate lists: the first non-empty entry
//! wins. Keep them as lists so the precedence stays readable in one place.

use crate::codec;
use crate::domain::{
    BinaryRelayResult, DEFAULT_ARCHIVE_FILENAME, DEFAULT_CONTENT_TYPE, MultiFileRelayResult,
    RelayKind, UpstreamHeaders, UpstreamOutcome,
};
use crate::error::RelayError;

const CONTENT_TYPE: &str = "content-type";
const CONTENT_DISPOSITION: &str = "content-disposition";
const FILENAME_TOKEN: &str = "filename=";

/// Return the first candidate that is present and not blank.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.trim().is_empty())
}

/// Content type for the outbound request: the caller's, else the default.
pub fn outbound_content_type(requested: Option<&str>) -> &str {
    first_non_empty([requested]).unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// Content type reported back to the caller.
///
/// Upstream header, then the caller's declared type, then the default.
pub fn resolve_content_type<'a>(
    headers: &'a UpstreamHeaders,
    requested: Option<&'a str>,
) -> &'a str {
    first_non_empty([headers.get(CONTENT_TYPE), requested]).unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// Extract the filename parameter from a `Content-Disposition` value.
///
/// Takes the text after the first `filename=`. A quoted value runs to the
/// closing quote (or the end when unterminated); a bare token stops at the
/// next `;`. The token match ignores ASCII case. `filename*=` does not match.
pub fn filename_from_content_disposition(value: &str) -> Option<&str> {
    let start = value.to_ascii_lowercase().find(FILENAME_TOKEN)? + FILENAME_TOKEN.len();
    let rest = value[start..].trim_start();
    let filename = match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or(quoted),
        None => rest.split(';').next().unwrap_or(rest),
    }
    .trim();
    (!filename.is_empty()).then_some(filename)
}

/// Archive filename reported back to the caller.
pub fn resolve_archive_filename(headers: &UpstreamHeaders) -> &str {
    let from_disposition = headers
        .get(CONTENT_DISPOSITION)
        .and_then(filename_from_content_disposition);
    first_non_empty([from_disposition]).unwrap_or(DEFAULT_ARCHIVE_FILENAME)
}

fn ensure_succeeded(kind: RelayKind, outcome: &UpstreamOutcome) -> Result<(), RelayError> {
    if outcome.succeeded() {
        Ok(())
    } else {
        Err(RelayError::Upstream {
            kind,
            status: outcome.status,
        })
    }
}

/// Transcode a single-payload relay outcome.
pub fn transcode_binary(
    outcome: &UpstreamOutcome,
    requested_content_type: Option<&str>,
) -> Result<BinaryRelayResult, RelayError> {
    ensure_succeeded(RelayKind::Binary, outcome)?;

    Ok(BinaryRelayResult {
        result: codec::encode(&outcome.body),
        content_type: resolve_content_type(&outcome.headers, requested_content_type).to_string(),
    })
}

/// Transcode a multi-file relay outcome.
pub fn transcode_multi_file(outcome: &UpstreamOutcome) -> Result<MultiFileRelayResult, RelayError> {
    ensure_succeeded(RelayKind::MultiFile, outcome)?;

    Ok(MultiFileRelayResult {
        zip: codec::encode(&outcome.body),
        filename: resolve_archive_filename(&outcome.headers).to_string(),
    })
}
