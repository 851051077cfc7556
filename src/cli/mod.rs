//! Command-line interface.
//!
//! ```ignore
//! use clap::Parser;
//! use machine_sync::cli::Args;
//!
//! let startup = Args::parse().into_startup_config()?;
//! ```

pub mod args;

pub use args::{Args, ArgsError};
