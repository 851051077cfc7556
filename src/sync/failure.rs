//! Per-event failures and the error sink that collects them.
//!
//! Handling units never stop the watch loop. Whatever goes wrong while
//! handling one event is turned into a [`SyncFailure`] and sent down a single
//! unbounded channel, where one reporter task logs it and drops it.

use std::fmt;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::error::ErrorCategory;
use crate::watcher::ChangeEvent;

/// What went wrong while handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCause {
    /// The local file could not be opened or read.
    LocalRead,
    /// Remote remove of a deleted file failed.
    RemoteRemove,
    /// Remote file could not be created.
    RemoteCreate,
    /// Writing content to the remote file failed.
    RemoteWrite,
    /// The transfer worker is gone.
    WorkerUnavailable,
}

impl FailureCause {
    pub fn error_code(&self) -> &'static str {
        match self {
            FailureCause::LocalRead => "E_SYNC_LOCAL_READ",
            FailureCause::RemoteRemove => "E_SYNC_REMOTE_REMOVE",
            FailureCause::RemoteCreate => "E_SYNC_REMOTE_CREATE",
            FailureCause::RemoteWrite => "E_SYNC_REMOTE_WRITE",
            FailureCause::WorkerUnavailable => "E_SYNC_WORKER",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FailureCause::LocalRead | FailureCause::WorkerUnavailable => ErrorCategory::System,
            FailureCause::RemoteRemove | FailureCause::RemoteCreate | FailureCause::RemoteWrite => {
                ErrorCategory::Remote
            }
        }
    }
}

/// A failed attempt to sync one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub event: ChangeEvent,
    pub cause: FailureCause,
    pub message: String,
}

impl SyncFailure {
    pub fn new(event: ChangeEvent, cause: FailureCause, message: impl Into<String>) -> Self {
        Self {
            event,
            cause,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Receiving half of the error sink.
pub type FailureReceiver = mpsc::UnboundedReceiver<SyncFailure>;

/// Sending half of the error sink. Cheap to clone; one per handling unit.
#[derive(Debug, Clone)]
pub struct ErrorSink {
    tx: mpsc::UnboundedSender<SyncFailure>,
}

impl ErrorSink {
    /// Create the sink and its single receiver.
    pub fn channel() -> (ErrorSink, FailureReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ErrorSink { tx }, rx)
    }

    /// Queue a failure for reporting. Never blocks.
    pub fn report(&self, failure: SyncFailure) {
        if let Err(err) = self.tx.send(failure) {
            // Reporter already shut down; log here so the failure isn't lost.
            warn!("error during sync (unreported): {}", err.0);
        }
    }
}

/// Spawn the reporter that drains the sink for the life of the process.
///
/// With `verbose` set, each report also logs the event and cause code. The
/// task finishes once every [`ErrorSink`] clone is dropped and returns how
/// many failures it reported.
pub fn spawn_reporter(mut rx: FailureReceiver, verbose: bool) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut reported = 0usize;
        while let Some(failure) = rx.recv().await {
            reported += 1;
            error!("error during sync: {}", failure);
            if verbose {
                debug!(
                    code = failure.cause.error_code(),
                    category = %failure.cause.category(),
                    event = %failure.event,
                    "sync failure detail"
                );
            }
        }
        reported
    })
}
