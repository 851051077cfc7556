//! SFTP transfer session adapter.
//!
//! Wraps an authenticated `ssh2` session and its SFTP channel and
//! implements [`TransferSession`] on top of them.

use std::io::Write;
use std::path::Path;

use ssh2::{File, Session, Sftp};

use crate::traits::{TransferError, TransferSession};

/// SFTP-backed transfer session.
///
/// Holds the SSH session alongside the SFTP channel so the transport lives
/// exactly as long as the channel built on it.
pub struct SftpTransfer {
    sftp: Sftp,
    _session: Session,
}

impl SftpTransfer {
    pub fn new(session: Session, sftp: Sftp) -> Self {
        Self {
            sftp,
            _session: session,
        }
    }
}

impl std::fmt::Debug for SftpTransfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SftpTransfer").finish_non_exhaustive()
    }
}

/// Remote file opened for writing, tagged with its path for error reports.
pub struct RemoteFile {
    path: String,
    file: File,
}

impl TransferSession for SftpTransfer {
    type Handle = RemoteFile;

    fn remove(&mut self, path: &str) -> Result<(), TransferError> {
        self.sftp
            .unlink(Path::new(path))
            .map_err(|e| TransferError::remove(path, e))
    }

    fn create(&mut self, path: &str) -> Result<RemoteFile, TransferError> {
        let file = self
            .sftp
            .create(Path::new(path))
            .map_err(|e| TransferError::create(path, e))?;
        Ok(RemoteFile {
            path: path.to_string(),
            file,
        })
    }

    fn write(&mut self, handle: &mut RemoteFile, data: &[u8]) -> Result<(), TransferError> {
        handle
            .file
            .write_all(data)
            .and_then(|_| handle.file.flush())
            .map_err(|e| TransferError::write(handle.path.as_str(), e))
    }
}
