//! Serve command handler.

use anyhow::Result;
use tracing::info;

use crate::commands::ServeArgs;

/// Execute the serve command.
///
/// Runs the relay server until Ctrl-C.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let config = args.to_server_config();

    info!(
        host = %config.host,
        port = config.port,
        upstream_timeout_secs = ?args.upstream_timeout_secs,
        "Starting relay server"
    );

    binrelay_axum::start_server(config).await
}
