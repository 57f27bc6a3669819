//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::crypto::{ring, CryptoProvider};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{ClientConfig, DigitallySignedStruct, Error, SignatureScheme};
use tokio_rustls::TlsConnector;

use tls_beacon::config::BeaconConfig;

/// Certificate verifier that accepts the self-signed test certificate.
#[derive(Debug)]
struct AcceptTestCert(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptTestCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

/// TLS-connect to `addr` and read until the server closes the connection.
pub async fn read_beacon_line(addr: SocketAddr) -> String {
    let provider = Arc::new(ring::default_provider());
    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptTestCert(provider)))
        .with_no_client_auth();
    let connector = TlsConnector::from(Arc::new(config));

    let tcp = TcpStream::connect(addr).await.expect("TCP connect failed");
    let server_name = ServerName::try_from("localhost").unwrap();
    let mut tls = connector
        .connect(server_name, tcp)
        .await
        .expect("TLS handshake failed");

    let mut line = String::new();
    tls.read_to_string(&mut line).await.expect("read failed");
    line
}

/// Beacon listener config bound to an ephemeral localhost port, using the
/// checked-in dev certificates.
pub fn test_beacon_config(id: u32) -> BeaconConfig {
    BeaconConfig {
        id,
        bind_address: "127.0.0.1:0".to_string(),
        cert_path: "certs/cert.pem".to_string(),
        key_path: "certs/key.pem".to_string(),
        max_connections: 64,
    }
}
