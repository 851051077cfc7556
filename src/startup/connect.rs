//! Session connector.
//!
//! Opens the SSH transport to the machine, authenticates with its private
//! key and negotiates the SFTP subsystem. Blocking; run it off the async
//! executor.

use std::net::TcpStream;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use ssh2::{HashType, Session};
use thiserror::Error;
use tracing::debug;

use super::config::RemoteTarget;
use crate::adapters::SftpTransfer;
use crate::auth::PrivateKey;

/// Error type for connection setup. All variants are fatal.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("could not reach {address}: {source}")]
    Unreachable {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create SSH session: {0}")]
    Session(#[source] ssh2::Error),

    #[error("SSH handshake with {address} failed: {source}")]
    Handshake {
        address: String,
        #[source]
        source: ssh2::Error,
    },

    #[error("authentication as {user} rejected: {message}")]
    AuthRejected { user: String, message: String },

    #[error("SFTP subsystem negotiation failed: {0}")]
    Sftp(#[source] ssh2::Error),
}

impl ConnectError {
    /// Whether the server was reached but refused the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, ConnectError::AuthRejected { .. })
    }
}

/// Connect to `target` and open an SFTP session.
///
/// The server's host key is not checked against known hosts; its SHA-256
/// fingerprint is logged at debug level.
pub fn connect(target: &RemoteTarget, key: &PrivateKey) -> Result<SftpTransfer, ConnectError> {
    let address = target.address();
    debug!(
        "connecting host={}:{} user={}",
        target.host, target.port, target.user
    );

    let tcp = TcpStream::connect((target.host.as_str(), target.port)).map_err(|source| {
        ConnectError::Unreachable {
            address: address.clone(),
            source,
        }
    })?;

    let mut session = Session::new().map_err(ConnectError::Session)?;
    session.set_tcp_stream(tcp);
    session
        .handshake()
        .map_err(|source| ConnectError::Handshake {
            address: address.clone(),
            source,
        })?;

    if let Some(hash) = session.host_key_hash(HashType::Sha256) {
        debug!("server host key SHA256:{}", STANDARD_NO_PAD.encode(hash));
    }

    key.authenticate(&session, &target.user)
        .map_err(|source| ConnectError::AuthRejected {
            user: target.user.clone(),
            message: source.to_string(),
        })?;
    if !session.authenticated() {
        return Err(ConnectError::AuthRejected {
            user: target.user.clone(),
            message: "not authenticated after public key exchange".to_string(),
        });
    }

    let sftp = session.sftp().map_err(ConnectError::Sftp)?;
    debug!("connected to {}", address);

    Ok(SftpTransfer::new(session, sftp))
}
