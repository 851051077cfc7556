//! Local change detection.
//!
//! [`ChangeSource`] wraps a non-recursive `notify` watcher over a single
//! directory and exposes it as a `futures::Stream` of [`ChangeEvent`]s with
//! paths relative to the watch root.

mod events;
mod source;

pub use events::{classify, events_from_notify, relative_to_root, ChangeEvent, ChangeKind};
pub use source::{ChangeSource, WatchError};
