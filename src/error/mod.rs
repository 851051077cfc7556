//! Error handling for machine-sync.
//!
//! Errors come in two tiers:
//!
//! - **Fatal**: startup failures unified under [`MachineSyncError`]. They are
//!   raised before the watch loop starts and end the process.
//! - **Reported**: per-event failures ([`crate::sync::SyncFailure`]). They are
//!   funneled through the error sink, logged, and discarded.
//!
//! # Error Categories
//!
//! | Category | Description |
//! |----------|-------------|
//! | Network | Machine unreachable, handshake failed |
//! | Auth | Key unreadable or rejected |
//! | Remote | SFTP remove/create/write rejected |
//! | User | Missing command-line flags |
//! | System | Local filesystem or watcher errors |
//! | Configuration | Machine config.json issues |

mod category;
mod machine_sync_error;

pub use category::ErrorCategory;
pub use machine_sync_error::MachineSyncError;

/// Result alias for fatal startup paths.
pub type SyncResult<T> = Result<T, MachineSyncError>;
