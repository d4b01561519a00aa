//! Server Implementation
//!
//! Binds the listener and serves until Ctrl-C.

use std::net::SocketAddr;

use crate::core::{Result, ServerError, ServerState};
use crate::services::build_app;

/// HTTP Server
pub struct Server {
    state: ServerState,
}

impl Server {
    /// Create server over an initialized state
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let app = build_app(self.state);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!("🦀 REST API listening on http://{}", addr);
        tracing::info!("📖 API docs at http://{}/docs", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler there is nothing to wait for
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
