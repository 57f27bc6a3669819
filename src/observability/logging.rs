//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Configure the log level from config, overridable via environment
//!
//! # Design Decisions
//! - The subscriber is constructed explicitly by the process entry rather
//!   than replaced as an ambient default mid-run

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::schema::ObservabilityConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// raise verbosity without touching the config file.
pub fn init(config: &ObservabilityConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
