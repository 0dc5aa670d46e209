//! Common types shared across hyde crates.
//!
//! This module provides the error taxonomy used by the codec and the
//! secret wrapper used to carry passphrases.

pub mod error;
pub mod types;

pub use error::{DecryptionError, EncryptionError, Error, Result};
pub use types::Password;
