//! Relay handlers.
//!
//! Bodies are taken as raw bytes so that unparseable JSON reaches the core
//! validator and gets the relay's own 400 message instead of Axum's.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use binrelay_core::{BinaryRelayResult, MultiFileRelayResult};

use crate::{error::HttpError, state::AppState};

/// Relay a single base64 payload.
pub async fn invert_image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BinaryRelayResult>, HttpError> {
    Ok(Json(state.relay.relay_binary(&body).await?))
}

/// Relay a set of files and return the upstream archive.
pub async fn zip_files(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MultiFileRelayResult>, HttpError> {
    Ok(Json(state.relay.relay_multi_file(&body).await?))
}
