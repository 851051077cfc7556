//! In-memory transfer session for testing.
//!
//! Behaves like a remote filesystem with flat path keys: removing a missing
//! file fails, creating truncates, writing appends. Every call is recorded so
//! tests can assert exactly which remote operations an event produced.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::traits::{TransferError, TransferSession};

/// One recorded call against the mock session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Remove(String),
    Create(String),
    Write(String, usize),
}

impl RemoteCall {
    /// Remote path the call targeted.
    pub fn path(&self) -> &str {
        match self {
            RemoteCall::Remove(path) | RemoteCall::Create(path) | RemoteCall::Write(path, _) => {
                path
            }
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    files: HashMap<String, Vec<u8>>,
    calls: Vec<RemoteCall>,
    fail_remove: HashSet<String>,
    fail_create: HashSet<String>,
    fail_write: HashSet<String>,
}

/// Writable handle returned by [`MockTransfer::create`].
#[derive(Debug)]
pub struct MockHandle {
    path: String,
}

/// In-memory transfer session.
///
/// Clones share state, so a test can hand one clone to the transfer worker
/// and inspect the remote side through another.
///
/// # Example
///
/// ```ignore
/// use machine_sync::adapters::mock::MockTransfer;
///
/// let remote = MockTransfer::new().with_file("/dest/old.txt", b"stale");
/// remote.fail_create_for("/dest/locked.txt");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransfer {
    state: Arc<Mutex<MockState>>,
}

impl MockTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a remote file.
    pub fn with_file(self, path: &str, contents: &[u8]) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.to_string(), contents.to_vec());
        self
    }

    /// Make every remove of `path` fail.
    pub fn fail_remove_for(&self, path: &str) {
        self.state.lock().unwrap().fail_remove.insert(path.to_string());
    }

    /// Make every create of `path` fail.
    pub fn fail_create_for(&self, path: &str) {
        self.state.lock().unwrap().fail_create.insert(path.to_string());
    }

    /// Make every write to `path` fail.
    pub fn fail_write_for(&self, path: &str) {
        self.state.lock().unwrap().fail_write.insert(path.to_string());
    }

    /// Current contents of a remote file.
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.state.lock().unwrap().files.contains_key(path)
    }

    /// All calls made so far, in execution order.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls that targeted `path`, in execution order.
    pub fn calls_for(&self, path: &str) -> Vec<RemoteCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.path() == path)
            .collect()
    }
}

impl TransferSession for MockTransfer {
    type Handle = MockHandle;

    fn remove(&mut self, path: &str) -> Result<(), TransferError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RemoteCall::Remove(path.to_string()));
        if state.fail_remove.contains(path) {
            return Err(TransferError::remove(path, "mock remove failure"));
        }
        match state.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(TransferError::remove(path, "no such file")),
        }
    }

    fn create(&mut self, path: &str) -> Result<MockHandle, TransferError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RemoteCall::Create(path.to_string()));
        if state.fail_create.contains(path) {
            return Err(TransferError::create(path, "mock create failure"));
        }
        state.files.insert(path.to_string(), Vec::new());
        Ok(MockHandle {
            path: path.to_string(),
        })
    }

    fn write(&mut self, handle: &mut MockHandle, data: &[u8]) -> Result<(), TransferError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(RemoteCall::Write(handle.path.clone(), data.len()));
        if state.fail_write.contains(&handle.path) {
            return Err(TransferError::write(&*handle.path, "mock write failure"));
        }
        state
            .files
            .entry(handle.path.clone())
            .or_default()
            .extend_from_slice(data);
        Ok(())
    }
}
