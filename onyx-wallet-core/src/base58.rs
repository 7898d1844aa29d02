//! Monero block base58
//!
//! Unlike Bitcoin's base58, Monero splits the input into 8-byte blocks and
//! encodes each one independently as a big-endian integer into a fixed number
//! of characters. A full block always becomes 11 characters; a trailing
//! partial block of `n` bytes becomes `ENCODED_BLOCK_SIZES[n]` characters.
//! Output length is therefore a function of input length only.

use crate::hash::keccak256;
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::network::CHECKSUM_LENGTH;

/// Base58 alphabet (no `0`, `O`, `I`, `l`)
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Bytes per full block
pub const FULL_BLOCK_SIZE: usize = 8;

/// Characters per full encoded block
pub const FULL_ENCODED_BLOCK_SIZE: usize = 11;

/// Encoded character count indexed by decoded block size (0..=8)
pub const ENCODED_BLOCK_SIZES: [usize; FULL_BLOCK_SIZE + 1] = [0, 2, 3, 5, 6, 7, 9, 10, 11];

const INVALID: u8 = 0xff;

const fn build_reverse_alphabet() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static REVERSE_ALPHABET: [u8; 128] = build_reverse_alphabet();

/// Whether `c` belongs to the base58 alphabet
#[must_use]
pub fn is_base58_char(c: char) -> bool {
    c.is_ascii() && REVERSE_ALPHABET[c as usize] != INVALID
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode bytes as Monero block base58
#[must_use]
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_length(data.len()));
    for block in data.chunks(FULL_BLOCK_SIZE) {
        encode_block(block, &mut out);
    }
    out
}

fn encoded_length(decoded_len: usize) -> usize {
    (decoded_len / FULL_BLOCK_SIZE) * FULL_ENCODED_BLOCK_SIZE
        + ENCODED_BLOCK_SIZES[decoded_len % FULL_BLOCK_SIZE]
}

fn encode_block(block: &[u8], out: &mut String) {
    let mut value = block
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

    let width = ENCODED_BLOCK_SIZES[block.len()];
    let mut digits = [ALPHABET[0]; FULL_ENCODED_BLOCK_SIZE];
    for slot in digits[..width].iter_mut().rev() {
        // value % 58 < 58, always a valid index
        *slot = ALPHABET[(value % 58) as usize];
        value /= 58;
    }
    out.extend(digits[..width].iter().map(|b| char::from(*b)));
}

/// Encode bytes with a trailing 4-byte Keccak-256 checksum
#[must_use]
pub fn encode_check(data: &[u8]) -> String {
    let checksum = keccak256(&[data]);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LENGTH);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
    encode(&payload)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode Monero block base58 text
///
/// The empty string decodes to an empty byte vector.
///
/// # Errors
/// - `InvalidSymbol` for characters outside the alphabet
/// - `InvalidBlockLength` when the trailing block length maps to no byte count
/// - `Overflow` when a block's value exceeds its decoded width
pub fn decode(text: &str) -> CryptoResult<Vec<u8>> {
    if let Some((position, symbol)) = text.char_indices().find(|(_, c)| !is_base58_char(*c)) {
        return Err(CryptoError::InvalidSymbol { symbol, position });
    }

    let bytes = text.as_bytes();
    let full_blocks = bytes.len() / FULL_ENCODED_BLOCK_SIZE;
    let tail = bytes.len() % FULL_ENCODED_BLOCK_SIZE;
    let tail_size = decoded_block_size(tail)?;

    let mut out = Vec::with_capacity(full_blocks * FULL_BLOCK_SIZE + tail_size);
    for (index, block) in bytes.chunks(FULL_ENCODED_BLOCK_SIZE).enumerate() {
        decode_block(block, index, &mut out)?;
    }
    Ok(out)
}

fn decoded_block_size(encoded_len: usize) -> CryptoResult<usize> {
    ENCODED_BLOCK_SIZES
        .iter()
        .position(|size| *size == encoded_len)
        .ok_or(CryptoError::InvalidBlockLength {
            length: encoded_len,
        })
}

fn decode_block(block: &[u8], index: usize, out: &mut Vec<u8>) -> CryptoResult<()> {
    let size = decoded_block_size(block.len())?;

    // 58^11 < 2^64 * 58, so a full block always fits in u128
    let value = block.iter().fold(0u128, |acc, c| {
        acc * 58 + u128::from(REVERSE_ALPHABET[usize::from(*c)])
    });

    if value >> (8 * size) != 0 {
        return Err(CryptoError::Overflow { block: index });
    }

    let be = value.to_be_bytes();
    out.extend_from_slice(&be[be.len() - size..]);
    Ok(())
}

/// Decode base58 text and verify its trailing 4-byte Keccak-256 checksum
///
/// Returns the payload without the checksum.
///
/// # Errors
/// Any `decode` error, `InvalidLength` if there is no room for a checksum,
/// or `ChecksumMismatch`.
pub fn decode_check(text: &str) -> CryptoResult<Vec<u8>> {
    let mut data = decode(text)?;
    if data.len() < CHECKSUM_LENGTH {
        return Err(CryptoError::InvalidLength {
            field: "checksummed payload".into(),
            expected: CHECKSUM_LENGTH,
            actual: data.len(),
        });
    }

    let split = data.len() - CHECKSUM_LENGTH;
    let expected = keccak256(&[&data[..split]]);
    if expected[..CHECKSUM_LENGTH] != data[split..] {
        return Err(CryptoError::ChecksumMismatch {
            expected: hex::encode(&expected[..CHECKSUM_LENGTH]),
            actual: hex::encode(&data[split..]),
        });
    }

    data.truncate(split);
    Ok(data)
}
