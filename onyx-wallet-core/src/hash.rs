//! Keccak-256 hashing helpers.
//!
//! Monero uses the original Keccak padding, not NIST SHA3-256. All
//! "hash to scalar" operations are Keccak-256 followed by reduction mod l.

use curve25519_dalek::scalar::Scalar;
use sha3::{Digest, Keccak256};

/// Keccak-256 of the concatenation of `parts`.
#[must_use]
pub fn keccak256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// `Hs(data) = keccak256(data) mod l`
#[must_use]
pub fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    Scalar::from_bytes_mod_order(keccak256(parts))
}
