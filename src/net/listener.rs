//! TLS beacon listener with a bounded accept loop and deliberate stop.
//!
//! # Responsibilities
//! - Load the endpoint credential, then bind the listening socket
//! - Accept connections and spawn one handler task per connection
//! - Enforce max_connections per listener via semaphore
//! - Distinguish a deliberate stop from a real accept failure

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{watch, Semaphore};
use tokio_rustls::TlsAcceptor;

use crate::config::BeaconConfig;
use crate::net::connection::ConnectionTracker;
use crate::net::error::ListenerError;
use crate::net::{handler, tls};

/// Lifecycle states for a beacon listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// Credential loaded, socket bound, accept loop not yet running.
    Starting,
    /// Accept loop is running.
    Running,
    /// Stop requested; the accept loop is about to exit.
    Stopping,
    /// Accept loop has exited and the socket is closed.
    Stopped,
}

/// A bound TLS beacon listener, not yet accepting.
///
/// `bind` and `spawn` are separate so startup can surface credential and
/// bind errors per listener before any accept loop runs.
pub struct BeaconListener {
    id: u32,
    inner: TcpListener,
    acceptor: TlsAcceptor,
    connection_limit: Arc<Semaphore>,
    tracker: ConnectionTracker,
    local_addr: SocketAddr,
    state_tx: Arc<watch::Sender<ListenerState>>,
    state_rx: watch::Receiver<ListenerState>,
}

impl BeaconListener {
    /// Load the endpoint credential and bind the listening socket.
    ///
    /// The credential is loaded before the bind, so a misconfigured
    /// listener never occupies its port.
    pub async fn bind(config: &BeaconConfig) -> Result<Self, ListenerError> {
        let acceptor =
            tls::load_tls_acceptor(Path::new(&config.cert_path), Path::new(&config.key_path))?;

        let addr: SocketAddr = config.bind_address.parse().map_err(|e| ListenerError::Bind {
            address: config.bind_address.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
        })?;

        let inner = TcpListener::bind(addr).await.map_err(|e| ListenerError::Bind {
            address: config.bind_address.clone(),
            source: e,
        })?;

        let local_addr = inner.local_addr().map_err(|e| ListenerError::Bind {
            address: config.bind_address.clone(),
            source: e,
        })?;

        tracing::info!(
            listener = config.id,
            address = %local_addr,
            max_connections = config.max_connections,
            "TLS beacon listener bound"
        );

        let (state_tx, state_rx) = watch::channel(ListenerState::Starting);

        Ok(Self {
            id: config.id,
            inner,
            acceptor,
            connection_limit: Arc::new(Semaphore::new(config.max_connections)),
            tracker: ConnectionTracker::new(),
            local_addr,
            state_tx: Arc::new(state_tx),
            state_rx,
        })
    }

    /// Local bound address (useful with port 0 in tests).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Start the accept loop and return a handle for stopping it.
    pub fn spawn(self) -> BeaconHandle {
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = BeaconHandle {
            id: self.id,
            local_addr: self.local_addr,
            stop_tx,
            state_tx: Arc::clone(&self.state_tx),
            state_rx: self.state_rx.clone(),
            tracker: self.tracker.clone(),
        };

        self.state_tx.send_replace(ListenerState::Running);
        tokio::spawn(accept_loop(self, stop_rx));

        handle
    }
}

/// Handle to a running beacon listener.
///
/// Stopping never cancels handlers already spawned; they run to completion
/// independently. `closed()` waits for the accept loop to exit and for
/// in-flight handlers to drain.
pub struct BeaconHandle {
    id: u32,
    local_addr: SocketAddr,
    stop_tx: watch::Sender<bool>,
    state_tx: Arc<watch::Sender<ListenerState>>,
    state_rx: watch::Receiver<ListenerState>,
    tracker: ConnectionTracker,
}

impl BeaconHandle {
    /// Listener identifier, as reported in the wire response.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Local bound address.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ListenerState {
        *self.state_rx.borrow()
    }

    /// Number of handlers currently in flight.
    pub fn active_connections(&self) -> u64 {
        self.tracker.active_count()
    }

    /// Request the accept loop to stop and close the listening socket.
    ///
    /// Stopping is recorded before the stop channel fires, so the accept
    /// loop treats the socket close as deliberate. Safe to call more than
    /// once; a blocked accept returns promptly.
    pub fn stop(&self) {
        self.state_tx.send_if_modified(|state| {
            if *state == ListenerState::Running {
                *state = ListenerState::Stopping;
                true
            } else {
                false
            }
        });
        self.stop_tx.send_replace(true);
    }

    /// Resolve once the accept loop has exited and every in-flight handler
    /// has finished.
    pub async fn closed(&self) {
        let mut state_rx = self.state_rx.clone();
        // wait_for checks the current value first, so an already-stopped
        // listener resolves immediately.
        let _ = state_rx
            .wait_for(|state| *state == ListenerState::Stopped)
            .await;
        self.tracker.drained().await;
    }
}

async fn accept_loop(listener: BeaconListener, mut stop_rx: watch::Receiver<bool>) {
    let BeaconListener {
        id,
        inner,
        acceptor,
        connection_limit,
        tracker,
        state_tx,
        ..
    } = listener;

    loop {
        // Backpressure first: a full handler pool stalls the accept instead
        // of spawning unbounded tasks.
        let permit = tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            permit = connection_limit.clone().acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        let (stream, peer) = tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            accepted = inner.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    if *stop_rx.borrow() {
                        break;
                    }
                    tracing::error!(
                        listener = id,
                        error = %ListenerError::Accept(e),
                        "Beacon listener terminated by accept failure"
                    );
                    break;
                }
            },
        };

        let guard = tracker.track();
        let acceptor = acceptor.clone();
        tokio::spawn(async move {
            let _permit = permit;
            handler::handle(acceptor, stream, peer, id, guard).await;
        });
    }

    // Dropping the TcpListener releases the socket.
    drop(inner);
    state_tx.send_replace(ListenerState::Stopped);
    tracing::info!(listener = id, "TLS beacon listener stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config(id: u32) -> BeaconConfig {
        BeaconConfig {
            id,
            bind_address: "127.0.0.1:0".to_string(),
            cert_path: "certs/cert.pem".to_string(),
            key_path: "certs/key.pem".to_string(),
            max_connections: 16,
        }
    }

    #[tokio::test]
    async fn bind_reports_credential_errors_first() {
        let mut config = local_config(1);
        config.cert_path = "certs/no-such-cert.pem".to_string();

        let err = BeaconListener::bind(&config).await.err().unwrap();
        assert!(matches!(err, ListenerError::Credential { .. }));
    }

    #[tokio::test]
    async fn bind_reports_address_conflicts() {
        let first = BeaconListener::bind(&local_config(1)).await.unwrap();

        let mut conflict = local_config(2);
        conflict.bind_address = first.local_addr().to_string();

        let err = BeaconListener::bind(&conflict).await.err().unwrap();
        assert!(matches!(err, ListenerError::Bind { .. }));
    }

    #[tokio::test]
    async fn listener_runs_through_its_states() {
        let listener = BeaconListener::bind(&local_config(3)).await.unwrap();
        assert_eq!(*listener.state_rx.borrow(), ListenerState::Starting);

        let handle = listener.spawn();
        assert_eq!(handle.state(), ListenerState::Running);

        handle.stop();
        tokio::time::timeout(std::time::Duration::from_secs(1), handle.closed())
            .await
            .expect("accept loop did not exit after stop");
        assert_eq!(handle.state(), ListenerState::Stopped);
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let handle = BeaconListener::bind(&local_config(4)).await.unwrap().spawn();

        handle.stop();
        handle.stop();
        handle.closed().await;
        assert_eq!(handle.state(), ListenerState::Stopped);
    }
}
