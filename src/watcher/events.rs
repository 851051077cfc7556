//! Change notifications produced by the watcher.

use std::fmt;
use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::EventKind;

/// Kind of local change observed under the watch root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
    Renamed,
}

impl ChangeKind {
    /// Deletions map to a remote remove; every other kind is a full overwrite.
    pub fn is_delete(&self) -> bool {
        matches!(self, ChangeKind::Deleted)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Renamed => "renamed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single local change, relative to the watch root.
///
/// Events are never merged: a burst of writes to one file yields one event
/// per notification, and each is handled on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    path: PathBuf,
    kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ChangeKind::Created)
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ChangeKind::Modified)
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ChangeKind::Deleted)
    }

    pub fn renamed(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ChangeKind::Renamed)
    }

    /// Path relative to the watch root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path.display())
    }
}

/// Classify a raw notify event kind. `None` means the event is not synced.
pub fn classify(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Renamed),
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        EventKind::Remove(_) => Some(ChangeKind::Deleted),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
    }
}

/// Convert a notify event into zero or more change events.
///
/// A rename that reports both the old and new name yields one `Renamed`
/// event per path.
pub fn events_from_notify(root: &Path, event: notify::Event) -> Vec<ChangeEvent> {
    let Some(kind) = classify(&event.kind) else {
        return Vec::new();
    };

    event
        .paths
        .into_iter()
        .filter_map(|path| relative_to_root(root, &path))
        .map(|path| ChangeEvent::new(path, kind))
        .collect()
}

/// Strip the watch root from a reported path.
///
/// Paths outside the root fall back to their file name; the root itself
/// yields `None`.
pub fn relative_to_root(root: &Path, path: &Path) -> Option<PathBuf> {
    let relative = match path.strip_prefix(root) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => PathBuf::from(path.file_name()?),
    };
    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}
