//! Password-based envelope encryption.
//!
//! Each envelope gets a fresh random salt, so even a repeated password
//! yields a fresh key, and a fresh random 12-byte nonce under that key.
//! AES-256-GCM provides confidentiality and authenticity; no associated
//! data is bound.

use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use rand::{CryptoRng, RngCore};

use crate::envelope::{self, Envelope, MAX_SALT_LEN, MIN_SALT_LEN, NONCE_SIZE, SALT_SIZE};
use crate::kdf::{derive_key, KdfParams};
use crate::keys::DerivedKey;
use hyde_common::{DecryptionError, EncryptionError, Error, Result};

/// Sizes and work factor used by an [`EnvelopeCodec`].
///
/// None of these values are written into the envelope. Encrypting and
/// decrypting sides must use identical parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecParams {
    salt_len: usize,
    kdf: KdfParams,
}

impl CodecParams {
    /// Create codec parameters.
    ///
    /// # Errors
    /// - Returns error if `salt_len` is outside
    ///   [`MIN_SALT_LEN`]..=[`MAX_SALT_LEN`]
    pub fn new(salt_len: usize, kdf: KdfParams) -> Result<Self> {
        if !(MIN_SALT_LEN..=MAX_SALT_LEN).contains(&salt_len) {
            return Err(Error::InvalidInput(format!(
                "Salt length must be between {} and {} bytes, got {}",
                MIN_SALT_LEN, MAX_SALT_LEN, salt_len
            )));
        }
        Ok(Self { salt_len, kdf })
    }

    /// Parameters for files written by the earlier CLI releases.
    pub fn legacy() -> Self {
        Self {
            salt_len: SALT_SIZE,
            kdf: KdfParams::legacy(),
        }
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            salt_len: SALT_SIZE,
            kdf: KdfParams::default(),
        }
    }
}

/// Seals plaintexts into envelopes and opens them again.
///
/// Stateless apart from its parameters; share it freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeCodec {
    params: CodecParams,
}

impl EnvelopeCodec {
    pub fn new(params: CodecParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Shortest input [`decrypt`](Self::decrypt) will attempt to open.
    pub fn min_envelope_len(&self) -> usize {
        envelope::min_len(self.params.salt_len).unwrap_or(usize::MAX)
    }

    /// Encrypt `plaintext` under `password` using the operating system's
    /// entropy source.
    ///
    /// # Errors
    /// - `RandomSourceFailure` if the OS cannot supply randomness
    /// - `PlaintextTooLarge` if the cipher refuses the payload
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        password: &str,
    ) -> std::result::Result<Vec<u8>, EncryptionError> {
        self.encrypt_with_rng(&mut OsRng, plaintext, password)
    }

    /// Encrypt with an explicit entropy source.
    ///
    /// The salt is drawn first, then the nonce, as two independent reads.
    ///
    /// # Postconditions
    /// - Output is `salt || nonce || ciphertext || tag`
    /// - Output length is `salt_len + 12 + plaintext.len() + 16`
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
        password: &str,
    ) -> std::result::Result<Vec<u8>, EncryptionError> {
        let mut salt = vec![0u8; self.params.salt_len];
        fill_random(rng, &mut salt)?;

        let key = derive_key(password, &salt, &self.params.kdf);

        let mut nonce = [0u8; NONCE_SIZE];
        fill_random(rng, &mut nonce)?;

        let ciphertext = cipher(&key)
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| EncryptionError::PlaintextTooLarge {
                len: plaintext.len(),
            })?;

        Ok(Envelope::new(&salt, &nonce, &ciphertext).to_bytes())
    }

    /// Decrypt an envelope produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    /// - `Malformed` if the input is shorter than
    ///   [`min_envelope_len`](Self::min_envelope_len); no key is derived
    /// - `AuthenticationFailed` for any tag mismatch
    pub fn decrypt(
        &self,
        envelope: &[u8],
        password: &str,
    ) -> std::result::Result<Vec<u8>, DecryptionError> {
        let envelope = Envelope::parse(envelope, self.params.salt_len)?;

        let key = derive_key(password, envelope.salt(), &self.params.kdf);

        cipher(&key)
            .decrypt(Nonce::from_slice(envelope.nonce()), envelope.ciphertext())
            .map_err(|_| DecryptionError::AuthenticationFailed)
    }
}

/// Encrypt `plaintext` under `password` with default parameters.
pub fn encrypt(
    plaintext: &[u8],
    password: &str,
) -> std::result::Result<Vec<u8>, EncryptionError> {
    EnvelopeCodec::default().encrypt(plaintext, password)
}

/// Decrypt an envelope with default parameters.
pub fn decrypt(
    envelope: &[u8],
    password: &str,
) -> std::result::Result<Vec<u8>, DecryptionError> {
    EnvelopeCodec::default().decrypt(envelope, password)
}

fn cipher(key: &DerivedKey) -> Aes256Gcm {
    // Key length is fixed by the type; from_slice cannot fail here.
    Aes256Gcm::new(GenericArray::from_slice(key.as_bytes()))
}

fn fill_random<R: RngCore + CryptoRng>(
    rng: &mut R,
    dest: &mut [u8],
) -> std::result::Result<(), EncryptionError> {
    rng.try_fill_bytes(dest)
        .map_err(|_| EncryptionError::RandomSourceFailure)
}
