//! Wires the watcher, transfer worker, engine and error sink together.

use std::future::Future;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::engine::SyncEngine;
use super::failure::{spawn_reporter, ErrorSink};
use super::worker::TransferWorker;
use crate::error::{MachineSyncError, SyncResult};
use crate::startup::SyncConfig;
use crate::traits::TransferSession;
use crate::watcher::ChangeSource;

/// Counters returned once the pipeline has shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineSummary {
    /// Events dispatched to handling units.
    pub dispatched: usize,
    /// Remote jobs the transfer worker executed.
    pub jobs: usize,
    /// Failures reported through the error sink.
    pub failures: usize,
}

/// A started pipeline: the watch is registered and the worker is running.
pub struct Pipeline {
    source: ChangeSource,
    worker: TransferWorker,
    engine: SyncEngine,
    reporter: JoinHandle<usize>,
}

impl Pipeline {
    /// Start watching and hand `session` to the transfer worker.
    ///
    /// Must be called inside a tokio runtime. Fails without touching the
    /// session if the config is invalid or the watch root can't be watched.
    pub fn start<S: TransferSession>(config: &SyncConfig, session: S) -> SyncResult<Self> {
        config.validate()?;
        let source = ChangeSource::watch(&config.local_root)?;
        let worker = TransferWorker::spawn(session).map_err(MachineSyncError::Worker)?;

        let (errors, failures) = ErrorSink::channel();
        let reporter = spawn_reporter(failures, config.verbose);

        // Events carry paths relative to the canonical root.
        let config = config.clone().with_local_root(source.root());
        let engine = SyncEngine::new(&config, worker.handle(), errors);

        Ok(Self {
            source,
            worker,
            engine,
            reporter,
        })
    }

    /// Run until `shutdown` resolves or the change stream ends, then drain.
    ///
    /// Draining stops the watch, waits for in-flight handling units, lets the
    /// worker finish its queue, and finally waits for the reporter.
    pub async fn run<F>(self, shutdown: F) -> SyncResult<PipelineSummary>
    where
        F: Future<Output = ()>,
    {
        let Pipeline {
            mut source,
            worker,
            mut engine,
            reporter,
        } = self;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutting down");
                    break;
                }
                next = source.next() => match next {
                    Some(event) => engine.dispatch(event),
                    None => {
                        debug!("change stream ended");
                        break;
                    }
                },
            }
        }
        drop(source);

        let dispatched = engine.dispatched();
        engine.shutdown().await;
        let jobs = tokio::task::spawn_blocking(move || worker.join()).await?;
        let failures = reporter.await?;

        Ok(PipelineSummary {
            dispatched,
            jobs,
            failures,
        })
    }
}
