//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind and spawn every configured beacon listener, in config order
//! - Contain per-listener startup failures
//!
//! # Design Decisions
//! - A listener that fails credential load or bind is logged and skipped;
//!   the others keep running (degraded continue)
//! - Startup fails only when no beacon listener could start at all

use crate::config::BeaconConfig;
use crate::net::{BeaconHandle, BeaconListener, ListenerError};

/// Start every configured beacon listener.
pub async fn start_beacons(configs: &[BeaconConfig]) -> Result<Vec<BeaconHandle>, ListenerError> {
    let mut handles = Vec::with_capacity(configs.len());
    let mut last_error = None;

    for config in configs {
        match BeaconListener::bind(config).await {
            Ok(listener) => handles.push(listener.spawn()),
            Err(e) => {
                tracing::error!(
                    listener = config.id,
                    error = %e,
                    "Beacon listener failed to start, continuing without it"
                );
                last_error = Some(e);
            }
        }
    }

    match (handles.is_empty(), last_error) {
        (true, Some(e)) => Err(e),
        _ => Ok(handles),
    }
}
