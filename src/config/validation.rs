//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check endpoint uniqueness (ids, bind addresses)
//! - Validate value ranges (connection limits, grace period)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No beacon listeners are configured.
    NoBeacons,
    /// Two beacon listeners share an id.
    DuplicateBeaconId(u32),
    /// Two listeners share a bind address.
    DuplicateBindAddress(String),
    /// A bind address does not parse as host:port.
    InvalidBindAddress { listener: String, address: String },
    /// A beacon listener allows zero concurrent connections.
    ZeroMaxConnections(u32),
    /// A beacon listener has an empty certificate or key path.
    EmptyCredentialPath(u32),
    /// The shutdown grace period is zero.
    ZeroGracePeriod,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NoBeacons => {
                write!(f, "at least one beacon listener must be configured")
            }
            ValidationError::DuplicateBeaconId(id) => {
                write!(f, "duplicate beacon listener id {}", id)
            }
            ValidationError::DuplicateBindAddress(addr) => {
                write!(f, "duplicate bind address {}", addr)
            }
            ValidationError::InvalidBindAddress { listener, address } => {
                write!(f, "{} has invalid bind address {:?}", listener, address)
            }
            ValidationError::ZeroMaxConnections(id) => {
                write!(f, "beacon listener {} must allow at least one connection", id)
            }
            ValidationError::EmptyCredentialPath(id) => {
                write!(f, "beacon listener {} has an empty credential path", id)
            }
            ValidationError::ZeroGracePeriod => {
                write!(f, "shutdown grace period must be non-zero")
            }
        }
    }
}

/// Validate a configuration, returning every violation found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.beacons.is_empty() {
        errors.push(ValidationError::NoBeacons);
    }

    let mut ids = HashSet::new();
    let mut addresses = HashSet::new();

    for beacon in &config.beacons {
        if !ids.insert(beacon.id) {
            errors.push(ValidationError::DuplicateBeaconId(beacon.id));
        }
        if !addresses.insert(beacon.bind_address.clone()) {
            errors.push(ValidationError::DuplicateBindAddress(
                beacon.bind_address.clone(),
            ));
        }
        if beacon.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidBindAddress {
                listener: format!("beacon listener {}", beacon.id),
                address: beacon.bind_address.clone(),
            });
        }
        if beacon.max_connections == 0 {
            errors.push(ValidationError::ZeroMaxConnections(beacon.id));
        }
        if beacon.cert_path.is_empty() || beacon.key_path.is_empty() {
            errors.push(ValidationError::EmptyCredentialPath(beacon.id));
        }
    }

    if !addresses.insert(config.http.bind_address.clone()) {
        errors.push(ValidationError::DuplicateBindAddress(
            config.http.bind_address.clone(),
        ));
    }
    if config.http.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            listener: "http listener".to_string(),
            address: config.http.bind_address.clone(),
        });
    }

    if config.shutdown.grace_period_secs == 0 {
        errors.push(ValidationError::ZeroGracePeriod);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
