//! Output recognition
//!
//! For each output `i`, each transaction public key `R` and each candidate
//! address spend key `B`:
//!
//! ```text
//! derivation = 8 * a * R
//! Hs_i       = Hs(derivation || varint(i))
//! owned      <=> Hs_i * G + B == P_i
//! ```
//!
//! Candidates are tried in order and the first match wins. Only addresses the
//! caller passes in are checked; there is no subaddress lookahead.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::amounts::{decrypt_amount, decrypt_payment_id};
use super::derivation::{compute_view_tag, derivation_to_scalar, generate_key_derivation};
use super::extra::{ExtraField, ExtraNonce};
use super::transaction::Transaction;
use crate::address::MoneroAddress;
use crate::keys::derive::{decompress_point, public_point};
use crate::types::errors::CryptoResult;
use crate::types::payment_id::PaymentId;

/// An output recognized as belonging to one of the candidate addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedOutput {
    /// Candidate address the output was sent to
    pub address: MoneroAddress,
    /// Transaction public key that produced the match
    pub tx_public_key: [u8; 32],
    /// Amount in atomic units
    pub amount: u64,
    /// Payment ID carried by the transaction, decrypted when short
    pub payment_id: Option<PaymentId>,
}

/// Scan result for one output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedOutput {
    /// Position in `vout`
    pub index: u64,
    /// One-time output key
    pub stealth_address: [u8; 32],
    /// Plaintext amount; `None` when amounts are encrypted
    pub amount: Option<u64>,
    /// Set when a candidate address owns the output
    pub owner: Option<OwnedOutput>,
}

impl ScannedOutput {
    /// Whether a candidate address owns this output
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }
}

struct TxKey {
    public_key: [u8; 32],
    derivation: [u8; 32],
}

/// Scan every output of `tx` against `candidates`
///
/// Returns one entry per output, in `vout` order.
///
/// # Errors
/// - `InvalidPublicKey` if a transaction public key or a candidate spend key
///   is not a valid point
/// - `InvalidLength`/`HexDecodeFailed` for a malformed output key
/// - `InvalidTransaction` for a bad view tag, or a missing or malformed
///   encrypted amount on an owned output
pub fn scan_outputs(
    tx: &Transaction,
    extra: &ExtraField,
    view_secret: &[u8; 32],
    candidates: &[MoneroAddress],
) -> CryptoResult<Vec<ScannedOutput>> {
    let view = Scalar::from_bytes_mod_order(*view_secret);

    let tx_keys = extra
        .public_keys()
        .into_iter()
        .map(|public_key| {
            let point = decompress_point(&public_key, "tx public key")?;
            Ok(TxKey {
                public_key,
                derivation: generate_key_derivation(&view, &point),
            })
        })
        .collect::<CryptoResult<Vec<_>>>()?;

    let spend_keys = candidates
        .iter()
        .map(|address| decompress_point(address.spend_key(), "candidate spend key"))
        .collect::<CryptoResult<Vec<_>>>()?;

    let payment_id = match extra.payment_id_nonce() {
        Some(ExtraNonce::PaymentId(id)) => Some(PaymentId::from_bytes(id)?),
        Some(ExtraNonce::EncryptedPaymentId(encrypted)) => tx_keys
            .first()
            .map(|key| PaymentId::from(decrypt_payment_id(encrypted, &key.derivation))),
        _ => None,
    };

    debug!(
        outputs = tx.vout.len(),
        tx_keys = tx_keys.len(),
        candidates = candidates.len(),
        "Scanning transaction outputs"
    );

    let encrypted_amounts = tx.has_encrypted_amounts();
    let mut scanned = Vec::with_capacity(tx.vout.len());

    for (index, (position, output)) in (0u64..).zip(tx.vout.iter().enumerate()) {
        let stealth_address = output.target.key()?;
        let view_tag = output.target.view_tag()?;

        let matched = CompressedEdwardsY(stealth_address)
            .decompress()
            .and_then(|point| {
                find_owner(&point, index, view_tag, &tx_keys, &spend_keys)
            });

        let owner = match matched {
            Some((key, candidate, shared_secret)) => {
                let amount = match tx.encrypted_amount(position)? {
                    Some(encrypted) => decrypt_amount(&shared_secret, &encrypted),
                    None => output.amount,
                };
                let address = candidates[candidate].clone();
                debug!(index, %address, amount, "Recognized owned output");
                Some(OwnedOutput {
                    address,
                    tx_public_key: key.public_key,
                    amount,
                    payment_id,
                })
            }
            None => None,
        };

        scanned.push(ScannedOutput {
            index,
            stealth_address,
            amount: (!encrypted_amounts).then_some(output.amount),
            owner,
        });
    }

    Ok(scanned)
}

/// First `(tx key, candidate, Hs_i)` whose expected output key equals `output_key`
fn find_owner<'a>(
    output_key: &EdwardsPoint,
    index: u64,
    view_tag: Option<u8>,
    tx_keys: &'a [TxKey],
    spend_keys: &[EdwardsPoint],
) -> Option<(&'a TxKey, usize, Scalar)> {
    for key in tx_keys {
        if let Some(tag) = view_tag {
            if compute_view_tag(&key.derivation, index) != tag {
                trace!(index, "View tag mismatch");
                continue;
            }
        }

        let shared_secret = derivation_to_scalar(&key.derivation, index);
        let base = public_point(&shared_secret);
        if let Some(candidate) = spend_keys
            .iter()
            .position(|spend| base + spend == *output_key)
        {
            return Some((key, candidate, shared_secret));
        }
    }
    None
}

/// Parse daemon JSON and scan it
///
/// # Errors
/// See [`Transaction::from_json`], [`ExtraField::parse`] and [`scan_outputs`].
pub fn scan_transaction_json(
    tx_json: &str,
    view_secret: &[u8; 32],
    candidates: &[MoneroAddress],
) -> CryptoResult<Vec<ScannedOutput>> {
    let tx = Transaction::from_json(tx_json)?;
    let extra = tx.parse_extra()?;
    scan_outputs(&tx, &extra, view_secret, candidates)
}
