//! Integration tests for the TLS beacon listeners.

use std::time::Duration;

use chrono::NaiveDateTime;
use tls_beacon::lifecycle::startup;
use tls_beacon::net::handler::TIMESTAMP_FORMAT;
use tls_beacon::net::{BeaconListener, ListenerError, ListenerState};

mod common;

#[tokio::test]
async fn two_listeners_serve_their_own_banner() {
    let handles = startup::start_beacons(&[
        common::test_beacon_config(1),
        common::test_beacon_config(2),
    ])
    .await
    .unwrap();
    assert_eq!(handles.len(), 2);

    for (handle, expected) in handles.iter().zip(["TCP server [1]:", "TCP server [2]:"]) {
        let line = common::read_beacon_line(handle.local_addr()).await;
        assert!(line.starts_with(expected), "unexpected banner: {line:?}");

        let ts = line.rsplit("at: ").next().unwrap();
        NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
            .unwrap_or_else(|e| panic!("unparsable timestamp {ts:?}: {e}"));
    }

    for handle in &handles {
        handle.stop();
        handle.closed().await;
    }
}

#[tokio::test]
async fn concurrent_connections_each_get_a_response() {
    let listener = BeaconListener::bind(&common::test_beacon_config(7))
        .await
        .unwrap();
    let handle = listener.spawn();
    let addr = handle.local_addr();

    let mut clients = Vec::new();
    for _ in 0..16 {
        clients.push(tokio::spawn(
            async move { common::read_beacon_line(addr).await },
        ));
    }
    for client in clients {
        let line = client.await.unwrap();
        assert!(line.starts_with("TCP server [7]:"), "got {line:?}");
    }

    handle.stop();
    handle.closed().await;
    assert_eq!(handle.active_connections(), 0);
}

#[tokio::test]
async fn stop_unblocks_the_accept_loop_promptly() {
    let listener = BeaconListener::bind(&common::test_beacon_config(3))
        .await
        .unwrap();
    let handle = listener.spawn();
    assert_eq!(handle.state(), ListenerState::Running);

    handle.stop();
    tokio::time::timeout(Duration::from_secs(1), handle.closed())
        .await
        .expect("accept loop did not exit after stop");
    assert_eq!(handle.state(), ListenerState::Stopped);

    // The socket is released: a new connection attempt is refused.
    assert!(tokio::net::TcpStream::connect(handle.local_addr())
        .await
        .is_err());
}

#[tokio::test]
async fn invalid_credential_path_fails_startup_without_binding() {
    let mut config = common::test_beacon_config(9);
    config.bind_address = "127.0.0.1:39417".to_string();
    config.cert_path = "certs/no-such-cert.pem".to_string();

    let err = BeaconListener::bind(&config).await.err().unwrap();
    assert!(matches!(err, ListenerError::Credential { .. }));

    // No socket was opened on the configured port.
    assert!(tokio::net::TcpStream::connect("127.0.0.1:39417")
        .await
        .is_err());
}
