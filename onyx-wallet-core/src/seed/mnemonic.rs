//! Mnemonic phrase encoding
//!
//! Each 4-byte chunk of the secret is read as a little-endian `u32` and
//! spread over three word indices:
//!
//! ```text
//! w1 = x mod n
//! w2 = (x / n + w1) mod n
//! w3 = (x / n / n + w2) mod n
//! ```
//!
//! with `n = 1626`. A checksum word (one of the data words, chosen by CRC-32
//! over their prefixes) is appended, giving 13 words for a 16-byte secret and
//! 25 words for a 32-byte one. Those are the only two forms [`encode`]
//! produces, so every phrase it returns decodes back to its input.

use tracing::debug;

use super::wordlist::{WordList, WORD_LIST_SIZE};
use crate::types::errors::{CryptoError, CryptoResult};

/// Word counts a phrase may have (with or without the checksum word)
pub const ACCEPTED_WORD_COUNTS: [usize; 4] = [12, 13, 24, 25];

/// Hex lengths [`encode`] accepts (16- and 32-byte secrets)
pub const ENCODABLE_HEX_LENGTHS: [usize; 2] = [32, 64];

const N: u64 = WORD_LIST_SIZE as u64;

/// Whether `text` is a single token of hex digits with a non-zero length
/// that is a multiple of 8
#[must_use]
pub fn is_bare_hex(text: &str) -> bool {
    !text.is_empty() && text.len() % 8 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Encode a hex secret as a mnemonic phrase, checksum word included
///
/// # Errors
/// Returns `InvalidEncoding` unless `hex_str` is 32 or 64 hex digits.
pub fn encode(hex_str: &str, wordlist: &WordList) -> CryptoResult<String> {
    if !ENCODABLE_HEX_LENGTHS.contains(&hex_str.len()) {
        return Err(CryptoError::InvalidEncoding(format!(
            "mnemonic input must be 32 or 64 hex digits, got {}",
            hex_str.len()
        )));
    }
    let bytes = hex::decode(hex_str)
        .map_err(|e| CryptoError::InvalidEncoding(format!("mnemonic input is not hex: {e}")))?;
    Ok(encode_bytes(&bytes, wordlist))
}

/// Encode raw bytes as a mnemonic phrase
///
/// Only whole 4-byte chunks are encoded.
#[must_use]
pub(crate) fn encode_bytes(bytes: &[u8], wordlist: &WordList) -> String {
    let mut words: Vec<&str> = Vec::with_capacity(bytes.len() / 4 * 3 + 1);

    for chunk in bytes.chunks_exact(4) {
        let x = u64::from(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        let w1 = x % N;
        let w2 = (x / N + w1) % N;
        let w3 = (x / N / N + w2) % N;
        for index in [w1, w2, w3] {
            // index < N, always a valid position
            words.push(wordlist.word(index as usize).unwrap_or_default());
        }
    }

    if !words.is_empty() {
        let checksum = words[wordlist.checksum_index(&words)];
        words.push(checksum);
    }
    words.join(" ")
}

/// Decode a mnemonic phrase to lowercase hex
///
/// Words are matched case-insensitively and in full. A 13- or 25-word phrase
/// has its final word verified as the checksum; 12- and 24-word phrases are
/// accepted without one. Input that is already bare hex (see
/// [`is_bare_hex`]) is returned lowercased.
///
/// # Errors
/// - `InvalidMnemonic` for a bad word count, an unknown word, or a word
///   triple that encodes no 32-bit value
/// - `InvalidChecksum` if the checksum word does not match
pub fn decode(phrase: &str, wordlist: &WordList) -> CryptoResult<String> {
    let trimmed = phrase.trim();
    if is_bare_hex(trimmed) {
        return Ok(trimmed.to_ascii_lowercase());
    }

    let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
    if !ACCEPTED_WORD_COUNTS.contains(&words.len()) {
        return Err(CryptoError::InvalidMnemonic(format!(
            "expected 12, 13, 24 or 25 words, got {}",
            words.len()
        )));
    }

    let (data_words, checksum_word) = match words.split_last() {
        Some((last, rest)) if words.len() % 3 == 1 => (rest, Some(last)),
        _ => (&words[..], None),
    };

    let indices = data_words
        .iter()
        .map(|word| {
            wordlist
                .index_of(word)
                .map(|i| i as u64)
                .ok_or_else(|| CryptoError::InvalidMnemonic(format!("unknown word '{word}'")))
        })
        .collect::<CryptoResult<Vec<u64>>>()?;

    let mut out = Vec::with_capacity(indices.len() / 3 * 4);
    for triple in indices.chunks_exact(3) {
        let (w1, w2, w3) = (triple[0], triple[1], triple[2]);
        let x = w1 + N * ((N - w1 + w2) % N) + N * N * ((N - w2 + w3) % N);
        let value = u32::try_from(x).map_err(|_| {
            CryptoError::InvalidMnemonic("word triple does not encode a 32-bit value".into())
        })?;
        out.extend_from_slice(&value.to_le_bytes());
    }

    if let Some(actual) = checksum_word {
        let expected = &data_words[wordlist.checksum_index(data_words)];
        if expected != actual {
            debug!(words = words.len(), "Mnemonic checksum mismatch");
            return Err(CryptoError::InvalidChecksum {
                expected: expected.clone(),
                actual: actual.clone(),
            });
        }
    }

    Ok(hex::encode(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::wordlist::english;

    const PHRASE_25: &str = "wedge going quick racetrack auburn physics lectures light waist axes whipped habitat square awkward together injury niece nugget guarded hive obnoxious waxing faked folding square";
    const HEX_32: &str = "8ffa9f586b86d294d93731765d192765311bddc76a4fa60311f8af36bbf6fb06";

    const PHRASE_13: &str = "ought knowledge upright innocent eldest nerves gopher fowls below exquisite aces basin fowls";
    const HEX_16: &str = "932d70711acc2d536ca11fcb79e05516";

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(encode(HEX_32, english()).unwrap(), PHRASE_25);
        assert_eq!(encode(HEX_16, english()).unwrap(), PHRASE_13);
    }

    #[test]
    fn test_decode_known_vectors() {
        assert_eq!(decode(PHRASE_25, english()).unwrap(), HEX_32);
        assert_eq!(decode(PHRASE_13, english()).unwrap(), HEX_16);
    }

    #[test]
    fn test_decode_without_checksum_word() {
        let twelve: Vec<&str> = PHRASE_13.split(' ').take(12).collect();
        assert_eq!(decode(&twelve.join(" "), english()).unwrap(), HEX_16);
        let twenty_four: Vec<&str> = PHRASE_25.split(' ').take(24).collect();
        assert_eq!(decode(&twenty_four.join(" "), english()).unwrap(), HEX_32);
    }

    #[test]
    fn test_decode_is_case_and_whitespace_insensitive() {
        let shouted = format!("  {}\n", PHRASE_25.to_uppercase().replace(' ', "\t "));
        assert_eq!(decode(&shouted, english()).unwrap(), HEX_32);
    }

    #[test]
    fn test_wrong_checksum_word() {
        let mut words: Vec<&str> = PHRASE_25.split(' ').collect();
        words[24] = "wedge";
        assert!(matches!(
            decode(&words.join(" "), english()),
            Err(CryptoError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn test_bad_word_counts() {
        let eleven: Vec<&str> = PHRASE_25.split(' ').take(11).collect();
        assert!(matches!(
            decode(&eleven.join(" "), english()),
            Err(CryptoError::InvalidMnemonic(_))
        ));
        assert!(decode("", english()).is_err());
    }

    #[test]
    fn test_unknown_word() {
        let phrase = PHRASE_25.replacen("wedge", "wedgie", 1);
        assert!(matches!(
            decode(&phrase, english()),
            Err(CryptoError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_encode_rejects_bad_hex() {
        assert!(encode("", english()).is_err());
        assert!(encode("abc", english()).is_err());
        assert!(encode(&"z".repeat(64), english()).unwrap_err().is_encoding_error());
    }

    #[test]
    fn test_encode_only_accepts_reversible_lengths() {
        for len in [8, 24, 40, 56, 72] {
            let hex_str = HEX_32.repeat(2)[..len].to_string();
            assert!(
                encode(&hex_str, english()).unwrap_err().is_encoding_error(),
                "{len} digits"
            );
        }
        for hex_str in [HEX_16, HEX_32] {
            let phrase = encode(hex_str, english()).unwrap();
            assert_eq!(decode(&phrase, english()).unwrap(), hex_str);
        }
    }

    #[test]
    fn test_decode_passes_bare_hex_through() {
        assert_eq!(decode("932d7071", english()).unwrap(), "932d7071");
        assert_eq!(
            decode(" 932D70711ACC2D536CA11FCB\n", english()).unwrap(),
            "932d70711acc2d536ca11fcb"
        );
        assert_eq!(decode(HEX_32, english()).unwrap(), HEX_32);

        // not a multiple of 8, so read as a one-word phrase
        assert!(matches!(
            decode("932d707", english()),
            Err(CryptoError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_is_bare_hex() {
        assert!(is_bare_hex("deadBEEF"));
        assert!(is_bare_hex(HEX_16));
        assert!(!is_bare_hex(""));
        assert!(!is_bare_hex("deadbee"));
        assert!(!is_bare_hex("deadbeeg"));
        assert!(!is_bare_hex("dead beef"));
    }

    #[test]
    fn test_triple_overflow() {
        // (1625, 1624, 1623) maps to a value past u32::MAX
        let w = |i: usize| english().word(i).unwrap().to_string();
        let triple = [w(1625), w(1624), w(1623)].join(" ");
        let phrase = [triple.as_str(); 4].join(" ");
        assert!(matches!(
            decode(&phrase, english()),
            Err(CryptoError::InvalidMnemonic(_))
        ));
    }
}
