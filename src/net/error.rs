//! Error definitions for the network layer.

use thiserror::Error;

/// Errors raised while starting or running a beacon listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Transport credential missing or unparseable at startup.
    #[error("failed to load TLS credential from {path}: {source}")]
    Credential {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Listening socket could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// An accept call failed while the listener was running.
    #[error("accept failed: {0}")]
    Accept(std::io::Error),
}

/// Result type for listener operations.
pub type ListenerResult<T> = Result<T, ListenerError>;
