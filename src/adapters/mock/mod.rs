//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockTransfer`] - in-memory remote filesystem with a call log

pub mod transfer;

pub use transfer::{MockHandle, MockTransfer, RemoteCall};
