//! Transfer session trait abstraction.
//!
//! The sync pipeline only ever issues three remote operations: remove a
//! path, create a file, and write bytes to a created file. Anything that can
//! do those three things can stand in for the SFTP session, which is how the
//! in-memory mock drives the tests.

use thiserror::Error;

/// Remote operation that failed, with the remote path and the server's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("remove {path}: {message}")]
    Remove { path: String, message: String },

    #[error("create {path}: {message}")]
    Create { path: String, message: String },

    #[error("write {path}: {message}")]
    Write { path: String, message: String },
}

impl TransferError {
    pub fn remove(path: impl Into<String>, message: impl ToString) -> Self {
        TransferError::Remove {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn create(path: impl Into<String>, message: impl ToString) -> Self {
        TransferError::Create {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn write(path: impl Into<String>, message: impl ToString) -> Self {
        TransferError::Write {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Remote path the failed operation targeted.
    pub fn path(&self) -> &str {
        match self {
            TransferError::Remove { path, .. }
            | TransferError::Create { path, .. }
            | TransferError::Write { path, .. } => path,
        }
    }
}

/// A live remote file-transfer channel.
///
/// Implementations are not required to be safe for concurrent use: the
/// transfer worker owns the session and calls it from a single thread.
pub trait TransferSession: Send + 'static {
    /// Writable remote file returned by [`TransferSession::create`].
    type Handle;

    /// Remove the file at `path`.
    fn remove(&mut self, path: &str) -> Result<(), TransferError>;

    /// Create (or truncate) the file at `path`.
    fn create(&mut self, path: &str) -> Result<Self::Handle, TransferError>;

    /// Write all of `data` to a file returned by `create`.
    fn write(&mut self, handle: &mut Self::Handle, data: &[u8]) -> Result<(), TransferError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_display() {
        let err = TransferError::create("/dest/a.txt", "permission denied");
        assert_eq!(err.to_string(), "create /dest/a.txt: permission denied");
        assert_eq!(err.path(), "/dest/a.txt");
    }

    #[test]
    fn test_transfer_error_path_for_each_variant() {
        assert_eq!(TransferError::remove("/a", "x").path(), "/a");
        assert_eq!(TransferError::write("/b", "x").path(), "/b");
    }
}
