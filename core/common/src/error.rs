//! Error types for hyde.
//!
//! The codec reports failures through two narrow enums, one per direction,
//! so callers can match on exactly the outcomes each operation can produce.
//! [`Error`] is the umbrella type for everything else in the workspace.

use thiserror::Error;

/// Failure while sealing a plaintext into an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionError {
    /// The secure random source could not produce salt or nonce bytes.
    ///
    /// This is fatal. Callers must not retry with a weaker source.
    #[error("Secure random source unavailable")]
    RandomSourceFailure,

    /// The cipher refused the payload (AES-GCM per-message limit).
    #[error("Plaintext too large to encrypt ({len} bytes)")]
    PlaintextTooLarge { len: usize },
}

/// Failure while opening an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptionError {
    /// Input is too short to hold a header and an authentication tag.
    #[error("Not a valid encrypted file: {len} bytes, need at least {min}")]
    Malformed { len: usize, min: usize },

    /// Tag verification failed.
    ///
    /// Wrong password, corrupted bytes and truncation all land here on
    /// purpose; there is no finer signal.
    #[error("Wrong password or corrupted file")]
    AuthenticationFailed,
}

/// Top-level error type for hyde operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Encryption failed.
    #[error("Encryption error: {0}")]
    Encryption(#[from] EncryptionError),

    /// Decryption failed.
    #[error("Decryption error: {0}")]
    Decryption(#[from] DecryptionError),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
