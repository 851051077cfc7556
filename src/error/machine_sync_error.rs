//! Unified fatal error type.
//!
//! Every variant stops the process before (or instead of) the watch loop.
//! Per-event failures never become a `MachineSyncError`; they go through the
//! error sink instead.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::auth::KeyError;
use crate::cli::ArgsError;
use crate::startup::{ConfigError, ConnectError};
use crate::watcher::WatchError;

/// Unified fatal error for machine-sync.
#[derive(Debug, Error)]
pub enum MachineSyncError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Watch(#[from] WatchError),

    /// The transfer worker thread could not be started.
    #[error("failed to start transfer worker: {0}")]
    Worker(#[source] std::io::Error),

    /// A background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl MachineSyncError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MachineSyncError::Args(_) => ErrorCategory::User,
            MachineSyncError::Config(_) => ErrorCategory::Configuration,
            MachineSyncError::Key(_) => ErrorCategory::Auth,
            MachineSyncError::Connect(err) => {
                if err.is_auth() {
                    ErrorCategory::Auth
                } else {
                    ErrorCategory::Network
                }
            }
            MachineSyncError::Watch(_)
            | MachineSyncError::Worker(_)
            | MachineSyncError::Task(_) => ErrorCategory::System,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            MachineSyncError::Args(_) => "E_ARGS",
            MachineSyncError::Config(_) => "E_CONFIG",
            MachineSyncError::Key(_) => "E_KEY",
            MachineSyncError::Connect(err) if err.is_auth() => "E_AUTH",
            MachineSyncError::Connect(_) => "E_CONNECT",
            MachineSyncError::Watch(_) => "E_WATCH",
            MachineSyncError::Worker(_) => "E_WORKER",
            MachineSyncError::Task(_) => "E_TASK",
        }
    }
}
