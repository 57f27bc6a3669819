//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to listeners at construction time
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; endpoints live for the process lifetime
//! - All ambient fields have defaults so a minimal config stays minimal
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BeaconConfig;
pub use schema::HttpConfig;
pub use schema::ServiceConfig;
