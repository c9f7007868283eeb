//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the relay service is wired to a
//! concrete dispatcher for the web adapter.

use std::sync::Arc;

use anyhow::Result;
use binrelay_core::{RelayService, UpstreamDispatcher};
use binrelay_http::{DispatcherConfig, ReqwestDispatcher};

/// Default cap on inbound JSON bodies (32 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Largest accepted request body in bytes. Larger bodies get a 413.
    pub body_limit: usize,
    /// Outbound client settings.
    pub dispatcher: DispatcherConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            cors: CorsConfig::default(),
            body_limit: DEFAULT_BODY_LIMIT,
            dispatcher: DispatcherConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    #[must_use]
    pub const fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: DispatcherConfig) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The relay pipeline shared by both endpoints.
    pub relay: Arc<RelayService>,
}

impl AxumContext {
    /// Build a context around any dispatcher. Tests inject fakes here.
    pub fn new(dispatcher: Arc<dyn UpstreamDispatcher>) -> Self {
        Self {
            relay: Arc::new(RelayService::new(dispatcher)),
        }
    }
}

/// Wire the production dispatcher into a fresh context.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let dispatcher = ReqwestDispatcher::new(&config.dispatcher)?;

    tracing::info!(
        target: "binrelay.bootstrap",
        timeout = ?config.dispatcher.timeout(),
        body_limit = config.body_limit,
        cors = ?config.cors,
        "Axum bootstrap complete"
    );

    Ok(AxumContext::new(Arc::new(dispatcher)))
}

/// Start the web server and run until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("binrelay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("binrelay shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
