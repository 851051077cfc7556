//! The sync pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  ChangeSource   │  notify, non-recursive
//! └────────┬────────┘
//!          │ ChangeEvent
//!          ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │   SyncEngine    │────▶│    ErrorSink    │──▶ reporter task (log)
//! │ task per event  │     │   (unbounded)   │
//! └────────┬────────┘     └─────────────────┘
//!          │ RemoteJob
//!          ▼
//! ┌─────────────────┐
//! │ TransferWorker  │  owns the session, one job at a time
//! └─────────────────┘
//! ```
//!
//! Events are handled concurrently and in no particular order. Two events
//! for the same path (say a delete quickly followed by a recreate) can reach
//! the worker in either order, so the remote file may end up out of step with
//! the local one until the next change.

mod engine;
mod failure;
mod pipeline;
mod remote_path;
mod worker;

pub use engine::{EventHandler, SyncEngine};
pub use failure::{spawn_reporter, ErrorSink, FailureCause, FailureReceiver, SyncFailure};
pub use pipeline::{Pipeline, PipelineSummary};
pub use remote_path::remote_path;
pub use worker::{execute, JobError, RemoteJob, TransferHandle, TransferWorker};
