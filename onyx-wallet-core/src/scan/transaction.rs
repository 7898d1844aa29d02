//! Transaction JSON model
//!
//! Mirrors the JSON produced by the daemon's `decode_as_json`. Only the
//! fields the scanner reads are modeled; unknown fields are ignored.
//!
//! ```text
//! {
//!   "version": 2,
//!   "vin":  [{"key": {...}} | {"gen": {"height": N}}],
//!   "vout": [{"amount": N, "target": {"key": "<hex>"}
//!                                  | {"tagged_key": {"key": "<hex>", "view_tag": "<hex>"}}}],
//!   "extra": [bytes...] | "<hex>",
//!   "rct_signatures": {"type": N, "ecdhInfo": [{"amount": "<hex>"}], ...}
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::amounts::{parse_encrypted_amount, ENCRYPTED_AMOUNT_LENGTH};
use super::extra::ExtraField;
use super::outputs::{scan_outputs, ScannedOutput};
use crate::address::MoneroAddress;
use crate::keys::account::AccountKeys;
use crate::keys::derive::parse_key_hex;
use crate::types::errors::{CryptoError, CryptoResult};

/// `RingCT` type of a transaction without `RingCT` data
pub const RCT_TYPE_NULL: u8 = 0;

/// A decoded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction format version
    #[serde(default)]
    pub version: u64,
    /// Unlock time (block height or timestamp)
    #[serde(default)]
    pub unlock_time: u64,
    /// Inputs
    #[serde(default)]
    pub vin: Vec<TxInput>,
    /// Outputs
    pub vout: Vec<TxOutput>,
    /// Raw extra field
    #[serde(default)]
    pub extra: RawExtra,
    /// `RingCT` data, absent on version 1 transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rct_signatures: Option<RctSignatures>,
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxInput {
    /// Coinbase input
    Gen {
        /// Block height the coinbase belongs to
        height: u64,
    },
    /// Spend of a previous output
    Key {
        /// Plaintext amount (0 for `RingCT`)
        #[serde(default)]
        amount: u64,
        /// Relative ring member offsets
        #[serde(default)]
        key_offsets: Vec<u64>,
        /// Key image, hex
        k_image: String,
    },
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Plaintext amount (0 for `RingCT` outputs)
    #[serde(default)]
    pub amount: u64,
    /// Output target
    pub target: OutputTarget,
}

/// Output target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    /// One-time public key, hex
    Key(String),
    /// One-time public key with a view tag
    TaggedKey {
        /// One-time public key, hex
        key: String,
        /// View tag, two hex digits
        view_tag: String,
    },
}

impl OutputTarget {
    /// The one-time output key
    ///
    /// # Errors
    /// Returns `InvalidLength` or `HexDecodeFailed` for a malformed key.
    pub fn key(&self) -> CryptoResult<[u8; 32]> {
        match self {
            Self::Key(key) | Self::TaggedKey { key, .. } => parse_key_hex(key, "output key"),
        }
    }

    /// The view tag, if this target carries one
    ///
    /// # Errors
    /// Returns `InvalidTransaction` unless the tag is one hex-encoded byte.
    pub fn view_tag(&self) -> CryptoResult<Option<u8>> {
        match self {
            Self::Key(_) => Ok(None),
            Self::TaggedKey { view_tag, .. } => {
                let mut tag = [0u8; 1];
                hex::decode_to_slice(view_tag, &mut tag).map_err(|e| {
                    CryptoError::InvalidTransaction(format!("view tag '{view_tag}': {e}"))
                })?;
                Ok(Some(tag[0]))
            }
        }
    }
}

/// Extra field as either a byte array or a hex string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawExtra {
    /// JSON array of byte values
    Bytes(Vec<u8>),
    /// Hex string
    Hex(String),
}

impl Default for RawExtra {
    fn default() -> Self {
        Self::Bytes(Vec::new())
    }
}

impl RawExtra {
    /// The raw extra bytes
    ///
    /// # Errors
    /// Returns `HexDecodeFailed` for a malformed hex string.
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes.clone()),
            Self::Hex(text) => hex::decode(text)
                .map_err(|e| CryptoError::HexDecodeFailed(format!("tx extra: {e}"))),
        }
    }
}

/// `RingCT` signature data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RctSignatures {
    /// `RingCT` type; 0 means no encrypted amounts
    #[serde(rename = "type", default)]
    pub rct_type: u8,
    /// Transaction fee in atomic units
    #[serde(rename = "txnFee", default)]
    pub txn_fee: u64,
    /// Encrypted amounts, one per output
    #[serde(rename = "ecdhInfo", default)]
    pub ecdh_info: Vec<EcdhInfo>,
    /// Output commitments, hex
    #[serde(rename = "outPk", default)]
    pub out_pk: Vec<String>,
}

/// Encrypted amount of one output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdhInfo {
    /// Encrypted amount, hex
    pub amount: String,
}

impl Transaction {
    /// Parse daemon JSON
    ///
    /// # Errors
    /// Returns `JsonError` for malformed JSON or a missing required field.
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the first input is a coinbase input
    #[must_use]
    pub fn is_coinbase(&self) -> bool {
        matches!(self.vin.first(), Some(TxInput::Gen { .. }))
    }

    /// Whether output amounts are encrypted
    #[must_use]
    pub fn has_encrypted_amounts(&self) -> bool {
        self.rct_signatures
            .as_ref()
            .is_some_and(|rct| rct.rct_type != RCT_TYPE_NULL)
    }

    /// Encrypted amount of output `index`, if amounts are encrypted
    ///
    /// # Errors
    /// Returns `InvalidTransaction` if amounts are encrypted but the entry is
    /// missing, or the entry is malformed.
    pub fn encrypted_amount(&self, index: usize) -> CryptoResult<Option<[u8; ENCRYPTED_AMOUNT_LENGTH]>> {
        let Some(rct) = self.rct_signatures.as_ref().filter(|_| self.has_encrypted_amounts())
        else {
            return Ok(None);
        };
        let info = rct.ecdh_info.get(index).ok_or_else(|| {
            CryptoError::InvalidTransaction(format!("no ecdhInfo entry for output {index}"))
        })?;
        parse_encrypted_amount(&info.amount)
            .map(Some)
            .map_err(|e| CryptoError::InvalidTransaction(format!("output {index}: {e}")))
    }

    /// Parse the extra field
    ///
    /// # Errors
    /// See [`ExtraField::parse`] and [`RawExtra::to_bytes`].
    pub fn parse_extra(&self) -> CryptoResult<ExtraField> {
        ExtraField::parse(&self.extra.to_bytes()?)
    }

    /// Scan every output against `candidates` using the account's view key
    ///
    /// # Errors
    /// See [`scan_outputs`].
    pub fn outputs(
        &self,
        account: &AccountKeys,
        candidates: &[MoneroAddress],
    ) -> CryptoResult<Vec<ScannedOutput>> {
        let extra = self.parse_extra()?;
        scan_outputs(self, &extra, &account.secret_view_key(), candidates)
    }
}
