//! Amount and payment ID decryption
//!
//! In `RingCT` outputs the amount is stored as 8 bytes XORed with a key
//! stream derived from the per-output scalar `Hs_i`. Encrypted payment IDs
//! in the extra nonce use the raw derivation instead.

use curve25519_dalek::scalar::Scalar;

use crate::hash::keccak256;
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::network::SHORT_PAYMENT_ID_LENGTH;

/// Length of an encrypted `RingCT` amount
pub const ENCRYPTED_AMOUNT_LENGTH: usize = 8;

/// Domain separator for the amount key stream
const AMOUNT_DOMAIN: &[u8] = b"amount";

/// Trailing byte appended to the derivation for payment ID keys
const ENCRYPTED_PAYMENT_ID_TAIL: u8 = 0x8d;

/// Decrypt an 8-byte `RingCT` amount
///
/// # Decryption Formula
///
/// ```text
/// 1. amount_key = keccak("amount" || Hs_i)
/// 2. amount = u64_le(encrypted XOR amount_key[0..8])
/// ```
#[must_use]
pub fn decrypt_amount(shared_secret: &Scalar, encrypted: &[u8; ENCRYPTED_AMOUNT_LENGTH]) -> u64 {
    let key = keccak256(&[AMOUNT_DOMAIN, shared_secret.as_bytes()]);
    let mut decoded = [0u8; ENCRYPTED_AMOUNT_LENGTH];
    for (out, (enc, k)) in decoded.iter_mut().zip(encrypted.iter().zip(key.iter())) {
        *out = enc ^ k;
    }
    u64::from_le_bytes(decoded)
}

/// Parse an ecdhInfo amount from hex
///
/// # Errors
/// - `HexDecodeFailed` for malformed hex
/// - `InvalidLength` unless the value is exactly 8 bytes
pub fn parse_encrypted_amount(hex_str: &str) -> CryptoResult<[u8; ENCRYPTED_AMOUNT_LENGTH]> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| CryptoError::HexDecodeFailed(format!("ecdhInfo amount: {e}")))?;
    bytes.as_slice().try_into().map_err(|_| CryptoError::InvalidLength {
        field: "ecdhInfo amount".into(),
        expected: ENCRYPTED_AMOUNT_LENGTH,
        actual: bytes.len(),
    })
}

/// Decrypt an 8-byte payment ID from the extra nonce
///
/// `pid = encrypted XOR keccak(derivation || 0x8d)[0..8]`
#[must_use]
pub fn decrypt_payment_id(
    encrypted: &[u8; SHORT_PAYMENT_ID_LENGTH],
    derivation: &[u8; 32],
) -> [u8; SHORT_PAYMENT_ID_LENGTH] {
    let key = keccak256(&[derivation, &[ENCRYPTED_PAYMENT_ID_TAIL]]);
    let mut decoded = [0u8; SHORT_PAYMENT_ID_LENGTH];
    for (out, (enc, k)) in decoded.iter_mut().zip(encrypted.iter().zip(key.iter())) {
        *out = enc ^ k;
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::derive::{decompress_point, parse_key_hex};
    use crate::scan::derivation::{derivation_to_scalar, generate_key_derivation};

    fn derivation(view_key_hex: &str, tx_pub_key_hex: &str) -> [u8; 32] {
        let view = Scalar::from_bytes_mod_order(parse_key_hex(view_key_hex, "view").unwrap());
        let tx_pub =
            decompress_point(&parse_key_hex(tx_pub_key_hex, "tx").unwrap(), "tx").unwrap();
        generate_key_derivation(&view, &tx_pub)
    }

    #[test]
    fn test_decrypt_amount_stagenet() {
        // Data from a stagenet escrow funding
        let derivation = derivation(
            "b7f874f9baea745f0e7e6817014e563384d90658045304a978d196346d513f06",
            "a4eb6c9c4b388f65b517897ad064b66478fe83a8844265988dcaed13f7428abd",
        );
        let encrypted = parse_encrypted_amount("6896a8310b1c55f4").unwrap();
        let hs = derivation_to_scalar(&derivation, 1);

        assert_eq!(decrypt_amount(&hs, &encrypted), 2_000_000_000);
    }

    #[test]
    fn test_decrypt_payment_id_vector() {
        let derivation = derivation(
            "09ed72c713d3e9e19bef2f5204cf85f6cb25de7842aa0722abeb12697f171903",
            "f564d3f1f14baa95380cd159423e977b2897416f2366fa5ea619dde43d4cba43",
        );
        let encrypted = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
        assert_eq!(
            hex::encode(decrypt_payment_id(&encrypted, &derivation)),
            "2a243c6aaac49cd9"
        );
    }

    #[test]
    fn test_parse_encrypted_amount_errors() {
        assert!(matches!(
            parse_encrypted_amount("0102"),
            Err(CryptoError::InvalidLength { actual: 2, .. })
        ));
        assert!(matches!(
            parse_encrypted_amount("not_valid_hex"),
            Err(CryptoError::HexDecodeFailed(_))
        ));
    }
}
