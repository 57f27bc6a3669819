//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for the termination-class signals
//! - Translate whichever fired into a single internal event
//!
//! # Design Decisions
//! - All three signals drive identical shutdown behavior, so they collapse
//!   into one `TerminationSignal` event at this boundary

use std::fmt;

/// A termination-class OS signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// SIGINT (Ctrl+C).
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// SIGQUIT.
    Quit,
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerminationSignal::Interrupt => "SIGINT",
            TerminationSignal::Terminate => "SIGTERM",
            TerminationSignal::Quit => "SIGQUIT",
        };
        f.write_str(name)
    }
}

/// Wait for the next termination-class signal.
#[cfg(unix)]
pub async fn wait_for_termination() -> TerminationSignal {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt =
        signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut terminate =
        signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut quit = signal(SignalKind::quit()).expect("failed to install SIGQUIT handler");

    tokio::select! {
        _ = interrupt.recv() => TerminationSignal::Interrupt,
        _ = terminate.recv() => TerminationSignal::Terminate,
        _ = quit.recv() => TerminationSignal::Quit,
    }
}

/// Windows fallback: only Ctrl+C is supported.
#[cfg(not(unix))]
pub async fn wait_for_termination() -> TerminationSignal {
    let _ = tokio::signal::ctrl_c().await;
    TerminationSignal::Interrupt
}
