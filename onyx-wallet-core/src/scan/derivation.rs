//! Shared-secret derivation for output recognition
//!
//! # Cryptographic Background
//!
//! The sender picks a random `r` and publishes `R = r*G` in the extra field.
//! Both sides can compute the same point:
//! - Sender: `8 * r * A` (A = recipient's public view key)
//! - Recipient: `8 * a * R` (a = recipient's secret view key)
//!
//! From that derivation, each output index gets its own scalar and one-time
//! key:
//!
//! ```text
//! 1. derivation = 8 * a * R                         (point, cofactor applied)
//! 2. Hs_i = Hs(derivation || varint(i))             (scalar)
//! 3. P_i  = Hs_i * G + B                            (expected output key)
//! ```

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;

use super::varint::encode_varint;
use crate::hash::{hash_to_scalar, keccak256};
use crate::keys::derive::public_point;

/// Domain separator for view tags
const VIEW_TAG_DOMAIN: &[u8] = b"view_tag";

/// Key derivation `8 * a * R`, compressed
#[must_use]
pub fn generate_key_derivation(secret_view: &Scalar, tx_public_key: &EdwardsPoint) -> [u8; 32] {
    (secret_view * tx_public_key)
        .mul_by_cofactor()
        .compress()
        .to_bytes()
}

/// `Hs(derivation || varint(output_index))`
#[must_use]
pub fn derivation_to_scalar(derivation: &[u8; 32], output_index: u64) -> Scalar {
    hash_to_scalar(&[derivation, &encode_varint(output_index)])
}

/// Expected one-time output key `Hs_i * G + spend`
#[must_use]
pub fn derive_output_public_key(
    derivation: &[u8; 32],
    output_index: u64,
    public_spend: &EdwardsPoint,
) -> EdwardsPoint {
    public_point(&derivation_to_scalar(derivation, output_index)) + public_spend
}

/// One-byte view tag: `keccak("view_tag" || derivation || varint(i))[0]`
#[must_use]
pub fn compute_view_tag(derivation: &[u8; 32], output_index: u64) -> u8 {
    keccak256(&[VIEW_TAG_DOMAIN, derivation, &encode_varint(output_index)])[0]
}
