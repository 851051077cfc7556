//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let remote = MockTransfer::new().with_file("/dest/a.txt", b"old");
//! let mut harness = Harness::new(remote);
//! harness.write_local("a.txt", b"new");
//! ```

#![allow(dead_code)]

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use machine_sync::adapters::MockTransfer;
use machine_sync::sync::{ErrorSink, EventHandler, FailureReceiver, SyncFailure, TransferWorker};
use tempfile::TempDir;

/// Remote base path every harness maps into.
pub const REMOTE_BASE: &str = "/dest";

/// A local directory, a mock remote, and a handler wired to a live worker.
pub struct Harness {
    pub local: TempDir,
    pub remote: MockTransfer,
    pub handler: EventHandler,
    pub worker: TransferWorker,
    pub errors: ErrorSink,
    failures: FailureReceiver,
}

impl Harness {
    pub fn new(remote: MockTransfer) -> Self {
        let local = TempDir::new().unwrap();
        let worker = TransferWorker::spawn(remote.clone()).unwrap();
        let (errors, failures) = ErrorSink::channel();
        let handler = EventHandler::new(local.path(), REMOTE_BASE, worker.handle(), errors.clone());
        Self {
            local,
            remote,
            handler,
            worker,
            errors,
            failures,
        }
    }

    pub fn root(&self) -> &Path {
        self.local.path()
    }

    pub fn write_local(&self, name: &str, contents: &[u8]) {
        std::fs::write(self.local.path().join(name), contents).unwrap();
    }

    /// Failures reported so far.
    pub fn drain_failures(&mut self) -> Vec<SyncFailure> {
        let mut failures = Vec::new();
        while let Ok(failure) = self.failures.try_recv() {
            failures.push(failure);
        }
        failures
    }
}

/// Remote path for a file name under [`REMOTE_BASE`].
pub fn remote(name: &str) -> String {
    format!("{}/{}", REMOTE_BASE, name)
}

/// Poll `check` until it holds, panicking after five seconds.
pub async fn wait_for<F>(what: &str, mut check: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !check() {
        if tokio::time::Instant::now() >= deadline {
            panic!("timed out waiting for {}", what);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Run `fut` with a five second timeout.
pub async fn within_timeout<T>(fut: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("timed out")
}
