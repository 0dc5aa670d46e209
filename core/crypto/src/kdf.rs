//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is not recorded in the envelope. Both sides of a
//! round trip must agree on it out of band, which in practice means the
//! compiled-in [`PBKDF2_ITERATIONS`]. Changing that constant makes every
//! envelope produced under the old value undecryptable.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::keys::{DerivedKey, KEY_LENGTH};
use hyde_common::{Error, Result};

/// Default PBKDF2 work factor.
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// Work factor used by the earlier command-line releases.
pub const LEGACY_ITERATIONS: u32 = 4096;

/// Parameters for PBKDF2 key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    iterations: u32,
}

impl KdfParams {
    /// Create parameters with a custom iteration count.
    ///
    /// # Errors
    /// - Returns error if `iterations` is zero
    pub fn new(iterations: u32) -> Result<Self> {
        if iterations == 0 {
            return Err(Error::InvalidInput(
                "KDF iteration count must be positive".to_string(),
            ));
        }
        Ok(Self { iterations })
    }

    /// Parameters matching files written by the earlier CLI releases.
    pub fn legacy() -> Self {
        Self {
            iterations: LEGACY_ITERATIONS,
        }
    }

    /// Number of PBKDF2 iterations.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }
}

/// Derive a key from a password and salt.
///
/// # Postconditions
/// - The derived key is deterministic given the same inputs
///
/// An empty password is accepted and yields a weak but valid key.
pub fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> DerivedKey {
    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, params.iterations, &mut key_bytes);

    let key = DerivedKey::from_bytes(key_bytes);
    key_bytes.zeroize();
    key
}
