//! Directory watching backed by the `notify` crate.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use super::events::{events_from_notify, ChangeEvent};

/// Errors raised while starting a watch. All of them are fatal.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("cannot watch {}: {source}", path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot watch {}: not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to create file watcher: {0}")]
    Init(#[source] notify::Error),

    #[error("failed to watch {}: {source}", path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Lazy, infinite stream of [`ChangeEvent`]s for one directory.
///
/// Only the root itself is watched; subdirectories are not followed. The
/// stream ends only when the underlying watcher shuts down, so dropping the
/// source is the way to stop it.
pub struct ChangeSource {
    root: PathBuf,
    rx: mpsc::UnboundedReceiver<notify::Result<notify::Event>>,
    pending: VecDeque<ChangeEvent>,
    // Dropping the watcher stops delivery.
    _watcher: RecommendedWatcher,
}

impl ChangeSource {
    /// Start watching `root`.
    ///
    /// The watch is registered before this returns, so changes made after
    /// the call are observed.
    pub fn watch(root: impl AsRef<Path>) -> Result<Self, WatchError> {
        let requested = root.as_ref();
        let root = requested
            .canonicalize()
            .map_err(|source| WatchError::RootUnavailable {
                path: requested.to_path_buf(),
                source,
            })?;
        if !root.is_dir() {
            return Err(WatchError::NotADirectory { path: root });
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // The receiver is gone once the source is dropped.
            let _ = tx.send(res);
        })
        .map_err(WatchError::Init)?;

        watcher
            .watch(&root, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Subscribe {
                path: root.clone(),
                source,
            })?;

        debug!("watching {}", root.display());

        Ok(Self {
            root,
            rx,
            pending: VecDeque::new(),
            _watcher: watcher,
        })
    }

    /// Canonical watch root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Stream for ChangeSource {
    type Item = ChangeEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(event) = this.pending.pop_front() {
                return Poll::Ready(Some(event));
            }

            match this.rx.poll_recv(cx) {
                Poll::Ready(Some(Ok(raw))) => {
                    debug!("event: {:?}", raw);
                    this.pending.extend(events_from_notify(&this.root, raw));
                }
                Poll::Ready(Some(Err(err))) => {
                    // Transient notification errors never end the stream.
                    debug!("error: {}", err);
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
