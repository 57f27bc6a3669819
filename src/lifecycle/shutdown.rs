//! Shutdown coordination.

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::time::timeout;

use crate::lifecycle::signals;
use crate::net::BeaconHandle;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Coordinator phases.
///
/// Armed → Triggered happens exactly once, on the first termination signal.
/// Done is terminal; the process is expected to exit shortly after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Armed,
    Triggered,
    Done,
}

/// Drives the orderly stop of every listener on the first termination signal.
///
/// Owns the beacon handles for the process lifetime; the HTTP listener is
/// reached through the [`Shutdown`] broadcast channel it subscribed to.
pub struct ShutdownCoordinator {
    beacons: Vec<BeaconHandle>,
    shutdown: Shutdown,
    grace: Duration,
    state_tx: watch::Sender<CoordinatorState>,
    state_rx: watch::Receiver<CoordinatorState>,
}

impl ShutdownCoordinator {
    /// Create a coordinator over the given listeners.
    pub fn new(beacons: Vec<BeaconHandle>, shutdown: Shutdown, grace: Duration) -> Self {
        let (state_tx, state_rx) = watch::channel(CoordinatorState::Armed);
        Self {
            beacons,
            shutdown,
            grace,
            state_tx,
            state_rx,
        }
    }

    /// Current coordinator phase.
    pub fn state(&self) -> CoordinatorState {
        *self.state_rx.borrow()
    }

    /// Subscribe to phase changes.
    pub fn state_receiver(&self) -> watch::Receiver<CoordinatorState> {
        self.state_rx.clone()
    }

    /// Block until a termination signal arrives, then run one shutdown
    /// sequence. Repeat signals are absorbed without a second sequence.
    pub async fn run(self) {
        let signal = signals::wait_for_termination().await;
        tracing::warn!(signal = %signal, "Termination signal received, shutting down");
        self.trigger().await;

        // Absorb repeat signals so a second Ctrl+C during the drain cannot
        // kill the process uncleanly.
        loop {
            let signal = signals::wait_for_termination().await;
            tracing::debug!(signal = %signal, "Shutdown already in progress");
        }
    }

    /// Run the shutdown sequence once. Later calls return immediately.
    pub async fn trigger(&self) {
        let transitioned = self.state_tx.send_if_modified(|state| {
            if *state == CoordinatorState::Armed {
                *state = CoordinatorState::Triggered;
                true
            } else {
                false
            }
        });
        if !transitioned {
            return;
        }

        for beacon in &self.beacons {
            beacon.stop();
        }

        let drain = async {
            for beacon in &self.beacons {
                beacon.closed().await;
            }
        };
        if timeout(self.grace, drain).await.is_err() {
            tracing::warn!(
                grace_secs = self.grace.as_secs(),
                "Timed out waiting for beacon listeners to close"
            );
        } else {
            tracing::info!("All beacon listeners closed");
        }

        // The HTTP listener goes last: releasing its serve call is what
        // lets the process exit.
        self.shutdown.trigger();
        self.state_tx.send_replace(CoordinatorState::Done);
    }
}
