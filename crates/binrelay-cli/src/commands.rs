//! Subcommand definitions.

use std::time::Duration;

use binrelay_axum::bootstrap::{DEFAULT_BODY_LIMIT, ServerConfig};
use binrelay_http::{DEFAULT_MAX_REDIRECTS, DEFAULT_POOL_MAX_IDLE_PER_HOST, DispatcherConfig};
use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay HTTP server
    Serve(ServeArgs),
}

/// Options for `binrelay serve`. Every flag has an environment fallback.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, env = "BINRELAY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "BINRELAY_PORT", default_value_t = 8787)]
    pub port: u16,

    /// Allowed CORS origins (comma separated). All origins when omitted.
    #[arg(long = "allowed-origin", env = "BINRELAY_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    /// Largest accepted request body in bytes
    #[arg(long, env = "BINRELAY_BODY_LIMIT", default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,

    /// Abort upstream requests after this many seconds. No limit when omitted.
    #[arg(long = "upstream-timeout", env = "BINRELAY_UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,

    /// Idle upstream connections kept per host
    #[arg(long = "upstream-pool-idle", env = "BINRELAY_UPSTREAM_POOL_IDLE", default_value_t = DEFAULT_POOL_MAX_IDLE_PER_HOST)]
    pub upstream_pool_idle: usize,

    /// Upstream redirects to follow. 0 disables redirects.
    #[arg(long = "upstream-max-redirects", env = "BINRELAY_UPSTREAM_MAX_REDIRECTS", default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub upstream_max_redirects: usize,
}

impl ServeArgs {
    /// Translate flags into the web adapter's configuration.
    pub fn to_server_config(&self) -> ServerConfig {
        let dispatcher = DispatcherConfig::new()
            .with_optional_timeout(self.upstream_timeout_secs.map(Duration::from_secs))
            .with_pool_max_idle_per_host(self.upstream_pool_idle)
            .with_max_redirects(self.upstream_max_redirects);

        let mut config = ServerConfig {
            host: self.host.clone(),
            port: self.port,
            ..ServerConfig::default()
        }
        .with_body_limit(self.body_limit)
        .with_dispatcher(dispatcher);

        if !self.allowed_origins.is_empty() {
            config = config.with_allowed_origins(self.allowed_origins.clone());
        }
        config
    }
}
