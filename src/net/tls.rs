//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

use crate::net::error::ListenerError;

/// Load a TLS acceptor from certificate and key files.
///
/// Any failure here is a [`ListenerError::Credential`]: the affected
/// listener must not open its socket.
pub fn load_tls_acceptor(cert_path: &Path, key_path: &Path) -> Result<TlsAcceptor, ListenerError> {
    let certs = load_certs(cert_path)?;
    let key = load_private_key(key_path)?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| {
            credential_error(
                cert_path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;

    Ok(TlsAcceptor::from(Arc::new(config)))
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, ListenerError> {
    let file = File::open(path).map_err(|e| credential_error(path, e))?;
    let mut reader = BufReader::new(file);

    let certs: Vec<_> = rustls_pemfile::certs(&mut reader)
        .collect::<Result<_, _>>()
        .map_err(|e| credential_error(path, e))?;

    if certs.is_empty() {
        return Err(credential_error(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "no certificates found in PEM file",
            ),
        ));
    }

    Ok(certs)
}

fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, ListenerError> {
    let file = File::open(path).map_err(|e| credential_error(path, e))?;
    let mut reader = BufReader::new(file);

    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| credential_error(path, e))?
        .ok_or_else(|| {
            credential_error(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "no private key found in PEM file",
                ),
            )
        })
}

fn credential_error(path: &Path, source: std::io::Error) -> ListenerError {
    ListenerError::Credential {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_certificate_is_a_credential_error() {
        let err = load_tls_acceptor(
            Path::new("certs/does-not-exist.pem"),
            Path::new("certs/key.pem"),
        )
        .err()
        .unwrap();
        assert!(matches!(err, ListenerError::Credential { .. }));
    }

    #[test]
    fn garbage_pem_is_a_credential_error() {
        let mut cert = tempfile::NamedTempFile::new().unwrap();
        writeln!(cert, "not a certificate").unwrap();

        let err = load_tls_acceptor(cert.path(), Path::new("certs/key.pem")).err().unwrap();
        assert!(matches!(err, ListenerError::Credential { .. }));
    }

    #[test]
    fn dev_certificates_load() {
        load_tls_acceptor(Path::new("certs/cert.pem"), Path::new("certs/key.pem")).unwrap();
    }
}
