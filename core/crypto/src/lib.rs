//! Cryptographic core for hyde.
//!
//! This module provides:
//! - Key derivation using PBKDF2-HMAC-SHA256
//! - Authenticated encryption using AES-256-GCM
//! - The `salt || nonce || ciphertext` envelope format
//!
//! # Security Guarantees
//! - Derived keys are zeroized on drop
//! - Every envelope uses a fresh random salt and nonce
//! - Wrong passwords and tampered envelopes fail with one opaque error
//!
//! Nothing in this crate logs, prompts or touches the filesystem.

pub mod codec;
pub mod envelope;
pub mod kdf;
pub mod keys;

#[cfg(test)]
mod proptests;

pub use codec::{decrypt, encrypt, CodecParams, EnvelopeCodec};
pub use envelope::{
    Envelope, MAX_SALT_LEN, MIN_ENVELOPE_LEN, MIN_SALT_LEN, NONCE_SIZE, SALT_SIZE, TAG_SIZE,
};
pub use kdf::{derive_key, KdfParams, LEGACY_ITERATIONS, PBKDF2_ITERATIONS};
pub use keys::{DerivedKey, KEY_LENGTH};
