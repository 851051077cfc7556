//! Prelude module for convenient imports.
//!
//! ```ignore
//! use machine_sync::prelude::*;
//! ```

pub use crate::error::{ErrorCategory, MachineSyncError, SyncResult};
pub use crate::startup::{StartupConfig, SyncConfig};
pub use crate::sync::{Pipeline, PipelineSummary, SyncFailure};
pub use crate::traits::{TransferError, TransferSession};
pub use crate::watcher::{ChangeEvent, ChangeKind};
