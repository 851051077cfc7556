//! machine-sync - mirror a local directory onto a docker-machine host
//!
//! Watches one local directory and replays every create, modify, rename and
//! delete onto a remote directory over SFTP.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod error;
pub mod prelude;
pub mod startup;
pub mod sync;
pub mod traits;
pub mod watcher;
