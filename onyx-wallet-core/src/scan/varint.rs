//! Monero varint encoding
//!
//! Seven data bits per byte, least significant group first. The high bit
//! (0x80) marks that another byte follows.

use crate::types::errors::{CryptoError, CryptoResult};

/// Maximum encoded length of a u64
pub const MAX_VARINT_LENGTH: usize = 10;

/// Encode a u64 as a Monero-compatible varint
///
/// ```rust
/// use onyx_wallet_core::scan::encode_varint;
///
/// assert_eq!(encode_varint(0), vec![0]);
/// assert_eq!(encode_varint(127), vec![127]);
/// assert_eq!(encode_varint(128), vec![0x80, 0x01]);
/// ```
#[must_use]
pub fn encode_varint(mut n: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(MAX_VARINT_LENGTH);
    loop {
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            result.push(byte);
            break;
        }
        result.push(byte | 0x80);
    }
    result
}

/// Decode a varint from the front of `bytes`
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
/// Returns `InvalidEncoding` if the input ends mid-varint or the value does
/// not fit in 64 bits.
pub fn decode_varint(bytes: &[u8]) -> CryptoResult<(u64, usize)> {
    let mut value = 0u64;
    for (i, byte) in bytes.iter().enumerate().take(MAX_VARINT_LENGTH) {
        let group = u64::from(byte & 0x7f);
        let shift = 7 * i;
        if shift == 63 && group > 1 {
            return Err(CryptoError::InvalidEncoding("varint overflows u64".into()));
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(CryptoError::InvalidEncoding(
        "varint is truncated or too long".into(),
    ))
}
