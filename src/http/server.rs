//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the Axum router for the supplied route table
//! - Wire up middleware (tracing, request timeout)
//! - Serve until the shutdown channel fires, draining in-flight requests
//!
//! The blocking `run` call is the process's liveness anchor: when it
//! returns, the process is expected to exit.

use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HttpConfig;

/// Service identifier reported by the status route.
pub const SERVICE_NAME: &str = "tls-beacon";

/// Body of the status route response.
#[derive(Debug, Clone, Serialize)]
pub struct StatusMessage {
    #[serde(rename = "Msg")]
    pub msg: String,
}

/// Default route table: a single status route.
pub fn routes() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Json<StatusMessage> {
    Json(StatusMessage {
        msg: SERVICE_NAME.to_string(),
    })
}

/// HTTP server for the status endpoint.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server with the default route table.
    pub fn new(config: &HttpConfig) -> Self {
        Self::with_routes(config, routes())
    }

    /// Create a server with an externally supplied route table.
    pub fn with_routes(config: &HttpConfig, routes: Router) -> Self {
        let router = routes
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http());
        Self { router }
    }

    /// Serve until the shutdown channel fires or a fatal error occurs.
    ///
    /// Graceful shutdown stops accepting new requests and lets in-flight
    /// requests finish before the socket is released.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
