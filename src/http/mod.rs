//! HTTP status subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → route table (externally supplied; default: GET / status)
//!     → JSON response
//! ```

pub mod server;

pub use server::{HttpServer, StatusMessage, SERVICE_NAME};
