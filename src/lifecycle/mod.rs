//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Init logging → Bind listeners → Spawn accept loops
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop beacon listeners → Bounded drain
//!         → Release HTTP listener → Exit
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM/SIGQUIT → one termination event
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then listeners
//! - Ordered shutdown: beacon listeners first, HTTP listener last
//!   (its serve call is the process liveness anchor)
//! - The shutdown drain is bounded by the configured grace period

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{CoordinatorState, Shutdown, ShutdownCoordinator};
pub use signals::TerminationSignal;
