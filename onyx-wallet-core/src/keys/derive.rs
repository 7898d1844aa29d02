//! Key Derivation and Key Validation
//!
//! This module provides the curve-level building blocks used by accounts,
//! addresses and the output scanner:
//! - Public key derivation from secret scalars
//! - Hex parsing and point decompression with typed errors
//! - View/spend key validation against an address
//! - Constant-time comparisons
//!
//! ## Security Properties
//!
//! - **Constant-time**: Key comparisons do not short-circuit
//! - **Zeroize**: Temporary copies of secret keys are cleared

use core::str::FromStr;

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use zeroize::Zeroize;

use crate::address::MoneroAddress;
use crate::types::errors::{CryptoError, CryptoResult};

// =============================================================================
// Parsing
// =============================================================================

/// Parse a 64-character hex string into a 32-byte key
///
/// # Errors
/// Returns `InvalidLength` or `HexDecodeFailed` naming `field`.
pub fn parse_key_hex(hex_str: &str, field: &str) -> CryptoResult<[u8; 32]> {
    if hex_str.len() != 64 {
        return Err(CryptoError::InvalidLength {
            field: field.into(),
            expected: 64,
            actual: hex_str.len(),
        });
    }

    let mut arr = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut arr)
        .map_err(|e| CryptoError::HexDecodeFailed(format!("Invalid {field} hex: {e}")))?;
    Ok(arr)
}

/// Decompress a 32-byte Edwards point
///
/// # Errors
/// Returns `InvalidPublicKey` if the bytes are not a valid point encoding.
pub fn decompress_point(bytes: &[u8; 32], field: &str) -> CryptoResult<EdwardsPoint> {
    CompressedEdwardsY(*bytes)
        .decompress()
        .ok_or_else(|| CryptoError::InvalidPublicKey(format!("{field} is not a valid point")))
}

// =============================================================================
// Public Key Derivation
// =============================================================================

/// Derives a public key from a private key scalar
///
/// Computes: P = k * G where G is the Ed25519 basepoint. The input is
/// reduced mod l first.
#[must_use]
pub fn derive_public_key(private_key: &[u8; 32]) -> [u8; 32] {
    let scalar = Scalar::from_bytes_mod_order(*private_key);
    public_point(&scalar).compress().to_bytes()
}

/// `k * G`
#[must_use]
pub fn public_point(scalar: &Scalar) -> EdwardsPoint {
    ED25519_BASEPOINT_TABLE * scalar
}

/// Derives a public key from a private key hex string
///
/// # Errors
/// Returns an error if the hex is malformed or not 64 characters.
pub fn derive_public_key_from_hex(private_key_hex: &str) -> CryptoResult<[u8; 32]> {
    let mut arr = parse_key_hex(private_key_hex, "private_key_hex")?;
    let result = derive_public_key(&arr);
    arr.zeroize();
    Ok(result)
}

// =============================================================================
// Key Validation
// =============================================================================

/// Whether `secret * G` equals `public`, compared in constant time
#[must_use]
pub fn secret_matches_public(secret: &[u8; 32], public: &[u8; 32]) -> bool {
    constant_time_compare(&derive_public_key(secret), public)
}

/// Validates that a private view key corresponds to a Monero address
///
/// # Returns
/// * `Ok(true)` if the view key derives to the public key embedded in the address
/// * `Ok(false)` if there's a mismatch
/// * `Err(_)` if the inputs are malformed, or the address is a subaddress
///   (whose view key is not `a * G`)
pub fn validate_view_key_matches_address(view_key_hex: &str, address: &str) -> CryptoResult<bool> {
    let mut view_arr = parse_key_hex(view_key_hex, "view_key_hex")?;
    let address = MoneroAddress::from_str(address)?;
    let matches = address.check_private_view_key(&view_arr);
    view_arr.zeroize();
    matches
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Constant-time comparison of two 32-byte arrays
///
/// Always compares all bytes regardless of where the first difference occurs.
#[inline]
#[must_use]
pub fn constant_time_compare(a: &[u8; 32], b: &[u8; 32]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
