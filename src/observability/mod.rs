//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; the subscriber is constructed
//!   explicitly at startup and scoped to the process lifetime
//! - The log sink is the only resource shared across tasks; tracing
//!   serializes concurrent writers

pub mod logging;
