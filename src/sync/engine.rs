//! Event handling and dispatch.
//!
//! [`EventHandler`] turns one [`ChangeEvent`] into one remote job and reports
//! any failure to the error sink. [`SyncEngine`] spawns a handling unit per
//! event, bounds how many run at once, and joins them on shutdown.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::failure::{ErrorSink, FailureCause, SyncFailure};
use super::remote_path::remote_path;
use super::worker::{RemoteJob, TransferHandle};
use crate::startup::SyncConfig;
use crate::watcher::ChangeEvent;

/// Handles single events. Cheap to clone into each handling unit.
#[derive(Debug, Clone)]
pub struct EventHandler {
    local_root: Arc<PathBuf>,
    remote_base: Arc<str>,
    transfer: TransferHandle,
    errors: ErrorSink,
}

impl EventHandler {
    pub fn new(
        local_root: impl Into<PathBuf>,
        remote_base: &str,
        transfer: TransferHandle,
        errors: ErrorSink,
    ) -> Self {
        Self {
            local_root: Arc::new(local_root.into()),
            remote_base: Arc::from(remote_base),
            transfer,
            errors,
        }
    }

    /// Remote path an event maps to.
    pub fn remote_path_for(&self, event: &ChangeEvent) -> String {
        remote_path(&self.remote_base, event.path())
    }

    /// Handle one event, reporting at most one failure to the sink.
    pub async fn handle(&self, event: ChangeEvent) {
        if let Err(failure) = self.apply(&event).await {
            self.errors.report(failure);
        }
    }

    /// Handle one event and return the failure instead of reporting it.
    pub async fn apply(&self, event: &ChangeEvent) -> Result<(), SyncFailure> {
        let remote_path = self.remote_path_for(event);

        let job = if event.kind().is_delete() {
            info!("deleting {}", remote_path);
            RemoteJob::Delete { remote_path }
        } else {
            info!("updating {}", remote_path);
            let local_path = self.local_root.join(event.path());
            let local = open_regular_file(&local_path).await.map_err(|message| {
                SyncFailure::new(event.clone(), FailureCause::LocalRead, message)
            })?;
            RemoteJob::Replace { remote_path, local }
        };

        match self.transfer.submit(job).await {
            Ok(written) => {
                debug!("synced {} ({} bytes)", event, written);
                Ok(())
            }
            Err(err) => Err(SyncFailure::new(event.clone(), err.cause(), err.to_string())),
        }
    }
}

/// Open `path` for upload. Anything other than a regular file is refused,
/// so nothing reaches the remote side for directories or special files.
async fn open_regular_file(path: &Path) -> Result<std::fs::File, String> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|err| format!("open {}: {}", path.display(), err))?;
    let metadata = file
        .metadata()
        .await
        .map_err(|err| format!("stat {}: {}", path.display(), err))?;
    if !metadata.is_file() {
        return Err(format!("{}: not a regular file", path.display()));
    }
    Ok(file.into_std().await)
}

/// Dispatches one handling unit per event.
///
/// Spawning never waits: the concurrency permit is taken inside the spawned
/// task, so the producer loop keeps draining notifications during a burst.
#[derive(Debug)]
pub struct SyncEngine {
    handler: EventHandler,
    permits: Arc<Semaphore>,
    units: JoinSet<()>,
    dispatched: usize,
}

impl SyncEngine {
    pub fn new(config: &SyncConfig, transfer: TransferHandle, errors: ErrorSink) -> Self {
        Self {
            handler: EventHandler::new(
                config.local_root.clone(),
                &config.remote_base_path,
                transfer,
                errors,
            ),
            permits: Arc::new(Semaphore::new(config.max_in_flight)),
            units: JoinSet::new(),
            dispatched: 0,
        }
    }

    pub fn handler(&self) -> &EventHandler {
        &self.handler
    }

    /// Spawn a handling unit for `event`.
    pub fn dispatch(&mut self, event: ChangeEvent) {
        self.reap();

        let handler = self.handler.clone();
        let permits = Arc::clone(&self.permits);
        self.units.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            handler.handle(event).await;
        });
        self.dispatched += 1;
    }

    /// Number of events dispatched so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Handling units spawned and not yet reaped.
    pub fn in_flight(&self) -> usize {
        self.units.len()
    }

    /// Wait for every handling unit to finish.
    ///
    /// Consumes the engine, dropping its transfer handle and error sink, so
    /// the worker and reporter can wind down afterwards.
    pub async fn shutdown(mut self) {
        while let Some(result) = self.units.join_next().await {
            log_unit_result(result);
        }
    }

    fn reap(&mut self) {
        while let Some(result) = self.units.try_join_next() {
            log_unit_result(result);
        }
    }
}

fn log_unit_result(result: Result<(), tokio::task::JoinError>) {
    if let Err(err) = result {
        warn!("handling unit failed: {}", err);
    }
}
