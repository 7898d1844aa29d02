//! Error types for wallet operations
//!
//! This module defines all error types used throughout onyx-wallet-core.
//! Errors are categorized by the operation that caused them.

use thiserror::Error;

/// Result type alias for wallet operations
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Comprehensive error type for all wallet operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    // =========================================================================
    // Base58 Encoding Errors
    // =========================================================================
    /// Malformed base58 text or hex input
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Base58 block length that no byte count encodes to
    #[error("Invalid base58 block length: {length} characters")]
    InvalidBlockLength {
        /// Length of the offending block in characters
        length: usize,
    },

    /// Character outside the base58 alphabet
    #[error("Invalid base58 symbol '{symbol}' at position {position}")]
    InvalidSymbol {
        /// The rejected character
        symbol: char,
        /// Byte offset in the input text
        position: usize,
    },

    /// Decoded block value does not fit its byte width
    #[error("Base58 block {block} overflows its decoded size")]
    Overflow {
        /// Zero-based index of the offending block
        block: usize,
    },

    // =========================================================================
    // Address Errors
    // =========================================================================
    /// Address checksum mismatch
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Expected checksum (hex)
        expected: String,
        /// Actual checksum (hex)
        actual: String,
    },

    /// Leading network byte not in the netbyte table
    #[error("Unknown network byte: {0}")]
    UnknownNetworkByte(u8),

    /// Address text or bytes with the wrong length or shape
    #[error("Invalid address format: {0}")]
    InvalidFormat(String),

    /// Payment ID of the wrong width or not valid hex
    #[error("Invalid payment ID: {0}")]
    InvalidPaymentId(String),

    /// Operation not defined for this kind of address or key
    #[error("Not supported: {0}")]
    NotSupported(String),

    // =========================================================================
    // Seed Errors
    // =========================================================================
    /// Mnemonic with a bad word count or an unknown word
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Mnemonic checksum word does not match the recomputed one
    #[error("Invalid mnemonic checksum: expected '{expected}', got '{actual}'")]
    InvalidChecksum {
        /// Checksum word recomputed from the phrase
        expected: String,
        /// Checksum word present in the phrase
        actual: String,
    },

    /// Subaddress index outside the u32 range
    #[error("Index out of range: {field} = {value}")]
    IndexOutOfRange {
        /// Which index was rejected (`major` or `minor`)
        field: String,
        /// The rejected value
        value: i64,
    },

    // =========================================================================
    // Transaction Scanning Errors
    // =========================================================================
    /// Extra field record shorter than its declared size
    #[error("Truncated extra field: tag {tag:#04x} at offset {offset}")]
    TruncatedField {
        /// Tag of the truncated record
        tag: u8,
        /// Byte offset of the tag
        offset: usize,
    },

    /// Extra field tag the parser does not recognize
    #[error("Unknown extra field tag {tag:#04x} at offset {offset}")]
    UnknownTag {
        /// The unrecognized tag byte
        tag: u8,
        /// Byte offset of the tag
        offset: usize,
    },

    /// Transaction structure that cannot be scanned
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// JSON parsing failed
    #[error("JSON error: {0}")]
    JsonError(String),

    // =========================================================================
    // Key Errors
    // =========================================================================
    /// Invalid public key format or value
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid private/secret key format or value
    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),

    // =========================================================================
    // General Errors
    // =========================================================================
    /// Hex decoding failed
    #[error("Hex decode failed: {0}")]
    HexDecodeFailed(String),

    /// Invalid input length
    #[error("Invalid length for {field}: expected {expected}, got {actual}")]
    InvalidLength {
        /// Field name
        field: String,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Configuration value could not be understood
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CryptoError {
    /// Whether this error came from malformed base58 or hex text.
    #[must_use]
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEncoding(_)
                | Self::InvalidBlockLength { .. }
                | Self::InvalidSymbol { .. }
                | Self::Overflow { .. }
                | Self::HexDecodeFailed(_)
        )
    }
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
