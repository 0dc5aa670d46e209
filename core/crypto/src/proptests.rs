//! Property-based tests for the envelope codec.
//!
//! - Any plaintext round-trips under any password
//! - A different password never opens an envelope
//! - Any single-bit flip is rejected
//! - Inputs below the minimum length are malformed

use proptest::prelude::*;

use crate::codec::{CodecParams, EnvelopeCodec};
use crate::envelope::{Envelope, MIN_ENVELOPE_LEN};
use crate::kdf::{derive_key, KdfParams};
use hyde_common::DecryptionError;

fn codec() -> EnvelopeCodec {
    EnvelopeCodec::new(CodecParams::new(16, KdfParams::new(2).unwrap()).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip(
        plaintext in prop::collection::vec(any::<u8>(), 0..2048),
        password in ".{0,32}",
    ) {
        let codec = codec();
        let envelope = codec.encrypt(&plaintext, &password).unwrap();
        prop_assert_eq!(envelope.len(), MIN_ENVELOPE_LEN + plaintext.len());
        prop_assert_eq!(codec.decrypt(&envelope, &password).unwrap(), plaintext);
    }

    #[test]
    fn wrong_password_rejected(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        p1 in "[a-z]{1,16}",
        p2 in "[a-z]{1,16}",
    ) {
        prop_assume!(p1 != p2);
        let codec = codec();
        let envelope = codec.encrypt(&plaintext, &p1).unwrap();
        prop_assert_eq!(
            codec.decrypt(&envelope, &p2),
            Err(DecryptionError::AuthenticationFailed)
        );
    }

    #[test]
    fn single_bit_flip_rejected(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let codec = codec();
        let mut envelope = codec.encrypt(&plaintext, "pw").unwrap();
        let i = position.index(envelope.len());
        envelope[i] ^= 1 << bit;
        prop_assert_eq!(
            codec.decrypt(&envelope, "pw"),
            Err(DecryptionError::AuthenticationFailed)
        );
    }

    #[test]
    fn short_input_malformed(
        input in prop::collection::vec(any::<u8>(), 0..MIN_ENVELOPE_LEN),
    ) {
        let len = input.len();
        prop_assert_eq!(
            codec().decrypt(&input, "pw"),
            Err(DecryptionError::Malformed { len, min: MIN_ENVELOPE_LEN })
        );
    }

    #[test]
    fn parse_never_panics(
        input in prop::collection::vec(any::<u8>(), 0..128),
        salt_len in any::<usize>(),
    ) {
        match Envelope::parse(&input, salt_len) {
            Ok(envelope) => prop_assert_eq!(envelope.encoded_len(), input.len()),
            Err(err) => prop_assert!(matches!(err, DecryptionError::Malformed { .. }), "unexpected error: {:?}", err),
        }
    }

    #[test]
    fn derivation_deterministic(
        password in ".{0,32}",
        salt in prop::array::uniform16(any::<u8>()),
    ) {
        let params = KdfParams::new(2).unwrap();
        let k1 = derive_key(&password, &salt, &params);
        let k2 = derive_key(&password, &salt, &params);
        prop_assert_eq!(k1.as_bytes(), k2.as_bytes());
    }
}
