//! Common types used throughout hyde.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A passphrase that zeroizes on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Wrap a passphrase.
    ///
    /// Empty passphrases are accepted; they produce a weak but valid key.
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Get the passphrase.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Password {}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password([REDACTED])")
    }
}
