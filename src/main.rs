//! TLS Beacon Service
//!
//! A small supervisor that runs several independent listeners concurrently
//! and coordinates their shutdown on process-termination signals.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                  TLS BEACON                   │
//!                      │                                               │
//!  TLS client ─────────┼─▶ beacon listener [1] ──▶ handler (one line)  │
//!  TLS client ─────────┼─▶ beacon listener [2] ──▶ handler (one line)  │
//!  HTTP client ────────┼─▶ http listener ───────▶ GET / status JSON    │
//!                      │                                               │
//!                      │  SIGINT/SIGTERM/SIGQUIT                       │
//!                      │      └─▶ shutdown coordinator                 │
//!                      │             ├─ stop beacon listeners (drain)  │
//!                      │             └─ release http listener (anchor) │
//!                      └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use tls_beacon::config::loader::load_config;
use tls_beacon::config::ServiceConfig;
use tls_beacon::http::HttpServer;
use tls_beacon::lifecycle::{startup, Shutdown, ShutdownCoordinator};
use tls_beacon::observability::logging;

#[derive(Parser)]
#[command(name = "tls-beacon")]
#[command(about = "Multi-listener TLS beacon service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (built-in defaults if omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "failed to load configuration from {}: {}",
                    path.display(),
                    e
                );
                return ExitCode::FAILURE;
            }
        },
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(
        beacons = config.beacons.len(),
        http_address = %config.http.bind_address,
        "tls-beacon starting"
    );

    // The HTTP listener is the process's liveness anchor; a bind failure
    // here is fatal.
    let http_listener = match TcpListener::bind(&config.http.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                address = %config.http.bind_address,
                error = %e,
                "Failed to bind HTTP listener"
            );
            return ExitCode::FAILURE;
        }
    };

    let beacons = match startup::start_beacons(&config.beacons).await {
        Ok(handles) => handles,
        Err(e) => {
            tracing::error!(error = %e, "No beacon listener could start");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let coordinator = ShutdownCoordinator::new(
        beacons,
        shutdown,
        Duration::from_secs(config.shutdown.grace_period_secs),
    );
    tokio::spawn(coordinator.run());

    let server = HttpServer::new(&config.http);
    if let Err(e) = server.run(http_listener, server_shutdown).await {
        tracing::error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
