//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`TransferSession`] - remote remove/create/write over one session

pub mod transfer;

pub use transfer::{TransferError, TransferSession};
