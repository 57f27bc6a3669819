//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the beacon
//! service. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the beacon service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// TLS beacon listener endpoints.
    pub beacons: Vec<BeaconConfig>,

    /// HTTP status listener.
    pub http: HttpConfig,

    /// Shutdown coordination settings.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            beacons: vec![
                BeaconConfig {
                    id: 1,
                    bind_address: "0.0.0.0:8443".to_string(),
                    cert_path: default_cert_path(),
                    key_path: default_key_path(),
                    max_connections: default_max_connections(),
                },
                BeaconConfig {
                    id: 2,
                    bind_address: "0.0.0.0:8444".to_string(),
                    cert_path: default_cert_path(),
                    key_path: default_key_path(),
                    max_connections: default_max_connections(),
                },
            ],
            http: HttpConfig::default(),
            shutdown: ShutdownConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// One TLS beacon listener endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BeaconConfig {
    /// Numeric listener identifier, reported in the wire response.
    pub id: u32,

    /// Bind address (e.g., "0.0.0.0:8443").
    pub bind_address: String,

    /// Path to certificate file (PEM).
    #[serde(default = "default_cert_path")]
    pub cert_path: String,

    /// Path to private key file (PEM).
    #[serde(default = "default_key_path")]
    pub key_path: String,

    /// Maximum concurrently handled connections (backpressure).
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_cert_path() -> String {
    "certs/cert.pem".to_string()
}

fn default_key_path() -> String {
    "certs/key.pem".to_string()
}

fn default_max_connections() -> usize {
    1024
}

/// HTTP status listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Shutdown coordination configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Upper bound, in seconds, on waiting for the beacon listeners to
    /// close before the HTTP listener is released.
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
