//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`SftpTransfer`] - transfer session over `ssh2` SFTP
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockTransfer`] - in-memory remote filesystem

pub mod mock;
pub mod sftp;

pub use mock::MockTransfer;
pub use sftp::{RemoteFile, SftpTransfer};
