//! Single owner of the transfer session.
//!
//! The session is moved onto a dedicated thread and never shared. Handling
//! units submit whole jobs (a delete, or a remove/create/write replace) over
//! a queue and wait for the reply, so remote calls from different events can
//! never interleave.

use std::fs::File;
use std::io::Read;
use std::thread;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::failure::FailureCause;
use crate::traits::{TransferError, TransferSession};

/// One unit of remote work.
#[derive(Debug)]
pub enum RemoteJob {
    /// Remove the remote file.
    Delete { remote_path: String },
    /// Replace the remote file with the full contents of `local`.
    Replace { remote_path: String, local: File },
}

/// Why a job failed.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Remove(#[source] TransferError),

    #[error("{0}")]
    Create(#[source] TransferError),

    #[error("{0}")]
    Write(#[source] TransferError),

    #[error("read local file: {0}")]
    LocalRead(#[source] std::io::Error),

    #[error("transfer worker is not running")]
    WorkerUnavailable,
}

impl JobError {
    pub fn cause(&self) -> FailureCause {
        match self {
            JobError::Remove(_) => FailureCause::RemoteRemove,
            JobError::Create(_) => FailureCause::RemoteCreate,
            JobError::Write(_) => FailureCause::RemoteWrite,
            JobError::LocalRead(_) => FailureCause::LocalRead,
            JobError::WorkerUnavailable => FailureCause::WorkerUnavailable,
        }
    }
}

struct JobRequest {
    job: RemoteJob,
    reply: oneshot::Sender<Result<usize, JobError>>,
}

impl std::fmt::Debug for JobRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRequest").field("job", &self.job).finish()
    }
}

/// Run one job against the session. Returns the number of bytes written.
///
/// For a replace, a failed remove is expected (the file may not exist yet)
/// and is ignored. The local file is read only after the remote file has
/// been created.
pub fn execute<S: TransferSession>(session: &mut S, job: RemoteJob) -> Result<usize, JobError> {
    match job {
        RemoteJob::Delete { remote_path } => {
            session.remove(&remote_path).map_err(JobError::Remove)?;
            Ok(0)
        }
        RemoteJob::Replace {
            remote_path,
            mut local,
        } => {
            if let Err(err) = session.remove(&remote_path) {
                debug!("ignoring {}", err);
            }

            let mut handle = session.create(&remote_path).map_err(JobError::Create)?;

            let mut data = Vec::new();
            local.read_to_end(&mut data).map_err(JobError::LocalRead)?;

            session
                .write(&mut handle, &data)
                .map_err(JobError::Write)?;
            Ok(data.len())
        }
    }
}

/// Cloneable handle used by handling units to submit jobs.
#[derive(Debug, Clone)]
pub struct TransferHandle {
    tx: mpsc::UnboundedSender<JobRequest>,
}

impl TransferHandle {
    /// Queue a job and wait for it to run.
    pub async fn submit(&self, job: RemoteJob) -> Result<usize, JobError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(JobRequest { job, reply })
            .map_err(|_| JobError::WorkerUnavailable)?;
        rx.await.map_err(|_| JobError::WorkerUnavailable)?
    }
}

/// The worker thread and its queue.
#[derive(Debug)]
pub struct TransferWorker {
    handle: TransferHandle,
    thread: thread::JoinHandle<usize>,
}

impl TransferWorker {
    /// Move `session` onto a new worker thread.
    pub fn spawn<S: TransferSession>(session: S) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let thread = thread::Builder::new()
            .name("transfer-worker".to_string())
            .spawn(move || run(session, rx))?;
        Ok(Self {
            handle: TransferHandle { tx },
            thread,
        })
    }

    pub fn handle(&self) -> TransferHandle {
        self.handle.clone()
    }

    /// Close the queue and wait for the thread to finish.
    ///
    /// Blocks until every other [`TransferHandle`] is dropped and queued jobs
    /// have run. Returns the number of jobs executed.
    pub fn join(self) -> usize {
        drop(self.handle);
        self.thread.join().unwrap_or_else(|_| {
            tracing::error!("transfer worker panicked");
            0
        })
    }
}

fn run<S: TransferSession>(mut session: S, mut rx: mpsc::UnboundedReceiver<JobRequest>) -> usize {
    let mut executed = 0;
    while let Some(request) = rx.blocking_recv() {
        let outcome = execute(&mut session, request.job);
        executed += 1;
        // The submitter may have been cancelled; the job still ran.
        let _ = request.reply.send(outcome);
    }
    debug!("transfer worker stopped after {} jobs", executed);
    executed
}
