//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits, stop channel)
//!     → tls.rs (TLS handshake material)
//!     → handler.rs (one beacon line, then close)
//!
//! Listener states:
//!     Starting → Running → Stopping → Stopped
//! ```
//!
//! # Design Decisions
//! - Bounded handler pool per listener prevents resource exhaustion
//! - A deliberate stop is distinguishable from a real accept failure,
//!   and either one terminates only the affected listener
//! - Handlers own their connection; dropping it is the close

pub mod connection;
pub mod error;
pub mod handler;
pub mod listener;
pub mod tls;

pub use error::ListenerError;
pub use listener::{BeaconHandle, BeaconListener, ListenerState};
