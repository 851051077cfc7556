//! Credential provider.
//!
//! Loads the machine's private key and uses it to authenticate the SSH
//! transport.

mod private_key;

pub use private_key::{KeyError, KeyFormat, PrivateKey};
