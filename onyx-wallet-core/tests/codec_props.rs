//! Property-based tests for the base58 and mnemonic codecs
//!
//! Uses proptest to verify invariants across randomized inputs

use onyx_wallet_core::base58::{self, ENCODED_BLOCK_SIZES, FULL_BLOCK_SIZE, FULL_ENCODED_BLOCK_SIZE};
use onyx_wallet_core::scan::{decode_varint, encode_varint};
use onyx_wallet_core::seed::{mnemonic, wordlist};
use proptest::prelude::*;

fn expected_encoded_len(len: usize) -> usize {
    len / FULL_BLOCK_SIZE * FULL_ENCODED_BLOCK_SIZE + ENCODED_BLOCK_SIZES[len % FULL_BLOCK_SIZE]
}

proptest! {
    /// Property: decode(encode(x)) == x
    #[test]
    fn prop_base58_round_trip(data in prop::collection::vec(any::<u8>(), 0..160)) {
        let encoded = base58::encode(&data);
        prop_assert_eq!(base58::decode(&encoded).unwrap(), data);
    }

    /// Property: encoded length depends only on input length
    #[test]
    fn prop_base58_length(data in prop::collection::vec(any::<u8>(), 0..160)) {
        let encoded = base58::encode(&data);
        prop_assert_eq!(encoded.len(), expected_encoded_len(data.len()));
        prop_assert!(encoded.chars().all(base58::is_base58_char));
    }

    /// Property: checksummed encoding verifies and strips its checksum
    #[test]
    fn prop_base58_check_round_trip(data in prop::collection::vec(any::<u8>(), 1..100)) {
        let encoded = base58::encode_check(&data);
        prop_assert_eq!(base58::decode_check(&encoded).unwrap(), data);
    }

    /// Property: 32-byte seeds give 25 words that decode back
    #[test]
    fn prop_mnemonic_round_trip(seed in prop::array::uniform32(any::<u8>())) {
        let english = wordlist::english();
        let seed_hex = hex::encode(seed);
        let phrase = mnemonic::encode(&seed_hex, english).unwrap();
        prop_assert_eq!(phrase.split(' ').count(), 25);
        prop_assert_eq!(mnemonic::decode(&phrase, english).unwrap(), seed_hex);
    }

    /// Property: 16-byte seeds give 13 words that decode back
    #[test]
    fn prop_short_mnemonic_round_trip(seed in prop::array::uniform16(any::<u8>())) {
        let english = wordlist::english();
        let seed_hex = hex::encode(seed);
        let phrase = mnemonic::encode(&seed_hex, english).unwrap();
        prop_assert_eq!(phrase.split(' ').count(), 13);
        prop_assert_eq!(mnemonic::decode(&phrase.to_uppercase(), english).unwrap(), seed_hex);
    }

    /// Property: varints decode to the value and consume the whole encoding
    #[test]
    fn prop_varint_round_trip(value in any::<u64>()) {
        let encoded = encode_varint(value);
        prop_assert_eq!(decode_varint(&encoded).unwrap(), (value, encoded.len()));
    }
}
