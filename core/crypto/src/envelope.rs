//! Binary envelope layout.
//!
//! ```text
//! +----------------+-----------------+------------------------------+
//! | salt (16)      | nonce (12)      | ciphertext || tag (>= 16)    |
//! +----------------+-----------------+------------------------------+
//! ```
//!
//! There is no magic number, version byte or length prefix. An envelope is
//! recognised only by opening it with the right password.

use hyde_common::DecryptionError;

/// Default salt size in bytes.
pub const SALT_SIZE: usize = 16;

/// Smallest salt length accepted by [`crate::CodecParams`].
pub const MIN_SALT_LEN: usize = 8;

/// Largest salt length accepted by [`crate::CodecParams`].
pub const MAX_SALT_LEN: usize = 64;

/// Nonce size for AES-256-GCM (12 bytes).
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size (16 bytes).
pub const TAG_SIZE: usize = 16;

/// Minimum length of an envelope with the default salt size.
pub const MIN_ENVELOPE_LEN: usize = SALT_SIZE + NONCE_SIZE + TAG_SIZE;

/// Minimum envelope length for a given salt length.
///
/// `None` if the length does not fit in `usize`.
pub const fn min_len(salt_len: usize) -> Option<usize> {
    salt_len.checked_add(NONCE_SIZE + TAG_SIZE)
}

/// Borrowed view over the fields of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    salt: &'a [u8],
    nonce: &'a [u8; NONCE_SIZE],
    ciphertext: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Assemble a view from its parts.
    ///
    /// `ciphertext` is the AEAD output and already carries the tag.
    pub fn new(salt: &'a [u8], nonce: &'a [u8; NONCE_SIZE], ciphertext: &'a [u8]) -> Self {
        Self {
            salt,
            nonce,
            ciphertext,
        }
    }

    /// Split an envelope buffer into salt, nonce and ciphertext.
    ///
    /// # Errors
    /// - `Malformed` if `bytes` is shorter than `salt_len + 12 + 16`, or if
    ///   that sum overflows
    pub fn parse(bytes: &'a [u8], salt_len: usize) -> Result<Self, DecryptionError> {
        let min = min_len(salt_len);
        let malformed = DecryptionError::Malformed {
            len: bytes.len(),
            min: min.unwrap_or(usize::MAX),
        };
        match min {
            Some(min) if bytes.len() >= min => {}
            _ => return Err(malformed),
        }

        let (salt, rest) = bytes.split_at(salt_len);
        let (nonce, ciphertext) = rest.split_at(NONCE_SIZE);
        let nonce = nonce.try_into().map_err(|_| malformed)?;

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }

    pub fn salt(&self) -> &'a [u8] {
        self.salt
    }

    pub fn nonce(&self) -> &'a [u8; NONCE_SIZE] {
        self.nonce
    }

    /// AEAD output, tag included.
    pub fn ciphertext(&self) -> &'a [u8] {
        self.ciphertext
    }

    /// Length of the plaintext this envelope decrypts to.
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(TAG_SIZE)
    }

    /// Total serialized length.
    pub fn encoded_len(&self) -> usize {
        self.salt.len() + NONCE_SIZE + self.ciphertext.len()
    }

    /// Serialize as `salt || nonce || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(self.salt);
        out.extend_from_slice(self.nonce);
        out.extend_from_slice(self.ciphertext);
        out
    }
}
