//! Per-connection beacon handler.
//!
//! # Responsibilities
//! - Complete the TLS handshake on the accepted stream
//! - Write exactly one beacon line, then close the connection
//! - Contain handshake/write failures; nothing reaches the listener
//!
//! The connection is write-only: clients never send data, they connect to
//! observe the beacon line (liveness-probe pattern).

use std::net::SocketAddr;

use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::TlsAcceptor;

use crate::net::connection::ConnectionGuard;

/// ANSI C asctime timestamp, e.g. `Mon Jan  2 15:04:05 2006`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Compose the one-line response identifying a listener and the wall-clock
/// time of the accept.
pub fn beacon_line(listener_id: u32, now: DateTime<Local>) -> String {
    format!(
        "TCP server [{}]: Received connection at: {}",
        listener_id,
        now.format(TIMESTAMP_FORMAT)
    )
}

/// Handle one accepted connection.
///
/// The stream is owned here, so it is closed on every exit path when the
/// function returns.
pub async fn handle(
    acceptor: TlsAcceptor,
    stream: TcpStream,
    peer: SocketAddr,
    listener_id: u32,
    guard: ConnectionGuard,
) {
    let mut tls_stream = match acceptor.accept(stream).await {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(
                listener = listener_id,
                peer = %peer,
                error = %e,
                "TLS handshake failed"
            );
            return;
        }
    };

    let line = beacon_line(listener_id, Local::now());
    tracing::info!(
        listener = listener_id,
        peer = %peer,
        connection = %guard.id(),
        "{}",
        line
    );

    if let Err(e) = tls_stream.write_all(line.as_bytes()).await {
        tracing::warn!(
            listener = listener_id,
            peer = %peer,
            error = %e,
            "Failed to write beacon response"
        );
        return;
    }

    // Send the close_notify so clients see a clean TLS EOF.
    if let Err(e) = tls_stream.shutdown().await {
        tracing::debug!(listener = listener_id, peer = %peer, error = %e, "TLS close failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeZone};

    #[test]
    fn beacon_line_has_fixed_prefix() {
        let now = Local.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        let line = beacon_line(1, now);
        assert!(line.starts_with("TCP server [1]: Received connection at: "));
    }

    #[test]
    fn beacon_line_timestamp_round_trips() {
        let now = Local.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        let line = beacon_line(2, now);

        let ts = line.rsplit("at: ").next().unwrap();
        let parsed = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap();
        let expected = NaiveDate::from_ymd_opt(2006, 1, 2)
            .unwrap()
            .and_hms_opt(15, 4, 5)
            .unwrap();
        assert_eq!(parsed, expected);
    }
}
