//! Transaction extra field parsing
//!
//! The extra field is a sequence of tagged records:
//!
//! | Tag    | Record                                                  |
//! |--------|---------------------------------------------------------|
//! | `0x00` | padding, a run of zero bytes                            |
//! | `0x01` | transaction public key, 32 bytes                        |
//! | `0x02` | nonce: length byte, then that many bytes                |
//! | `0x04` | additional public keys: varint count, then 32 bytes each |
//!
//! Inside a nonce, a leading `0x00` marks a 32-byte payment ID and a leading
//! `0x01` an 8-byte encrypted payment ID.

use tracing::trace;

use super::varint::decode_varint;
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::network::{PUBLIC_KEY_LENGTH, SHORT_PAYMENT_ID_LENGTH};
use crate::types::payment_id::LONG_PAYMENT_ID_LENGTH;

/// Padding tag
pub const TX_EXTRA_TAG_PADDING: u8 = 0x00;
/// Transaction public key tag
pub const TX_EXTRA_TAG_PUBKEY: u8 = 0x01;
/// Nonce tag
pub const TX_EXTRA_TAG_NONCE: u8 = 0x02;
/// Additional public keys tag
pub const TX_EXTRA_TAG_ADDITIONAL_PUBKEYS: u8 = 0x04;

/// Nonce prefix of an unencrypted 32-byte payment ID
pub const TX_EXTRA_NONCE_PAYMENT_ID: u8 = 0x00;
/// Nonce prefix of an encrypted 8-byte payment ID
pub const TX_EXTRA_NONCE_ENCRYPTED_PAYMENT_ID: u8 = 0x01;

/// Contents of a nonce record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraNonce {
    /// Unencrypted 32-byte payment ID
    PaymentId([u8; LONG_PAYMENT_ID_LENGTH]),
    /// 8-byte payment ID encrypted to the recipient
    EncryptedPaymentId([u8; SHORT_PAYMENT_ID_LENGTH]),
    /// Any other nonce payload
    Raw(Vec<u8>),
}

impl ExtraNonce {
    fn parse(bytes: &[u8]) -> Self {
        match bytes.split_first() {
            Some((&TX_EXTRA_NONCE_PAYMENT_ID, rest)) if rest.len() == LONG_PAYMENT_ID_LENGTH => {
                let mut id = [0u8; LONG_PAYMENT_ID_LENGTH];
                id.copy_from_slice(rest);
                Self::PaymentId(id)
            }
            Some((&TX_EXTRA_NONCE_ENCRYPTED_PAYMENT_ID, rest))
                if rest.len() == SHORT_PAYMENT_ID_LENGTH =>
            {
                let mut id = [0u8; SHORT_PAYMENT_ID_LENGTH];
                id.copy_from_slice(rest);
                Self::EncryptedPaymentId(id)
            }
            _ => Self::Raw(bytes.to_vec()),
        }
    }
}

/// A single record of the extra field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraRecord {
    /// Run of padding bytes, with its length
    Padding(usize),
    /// Transaction public key
    PublicKey([u8; PUBLIC_KEY_LENGTH]),
    /// Nonce record
    Nonce(ExtraNonce),
    /// Per-output additional public keys
    AdditionalPublicKeys(Vec<[u8; PUBLIC_KEY_LENGTH]>),
}

/// A parsed extra field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraField {
    records: Vec<ExtraRecord>,
}

impl ExtraField {
    /// Parse raw extra bytes
    ///
    /// # Errors
    /// - `TruncatedField` if a record runs past the end of the input
    /// - `UnknownTag` for any tag outside the table above
    pub fn parse(bytes: &[u8]) -> CryptoResult<Self> {
        let mut records = Vec::new();
        let mut offset = 0;

        while offset < bytes.len() {
            let tag = bytes[offset];
            let body = &bytes[offset + 1..];
            let truncated = move || CryptoError::TruncatedField { tag, offset };

            let (record, consumed) = match tag {
                TX_EXTRA_TAG_PADDING => {
                    let run = 1 + body.iter().take_while(|b| **b == 0).count();
                    (ExtraRecord::Padding(run), run)
                }
                TX_EXTRA_TAG_PUBKEY => {
                    let key = read_key(body).ok_or_else(truncated)?;
                    (ExtraRecord::PublicKey(key), 1 + PUBLIC_KEY_LENGTH)
                }
                TX_EXTRA_TAG_NONCE => {
                    let (&len, rest) = body.split_first().ok_or_else(truncated)?;
                    let len = usize::from(len);
                    let nonce = rest.get(..len).ok_or_else(truncated)?;
                    (ExtraRecord::Nonce(ExtraNonce::parse(nonce)), 2 + len)
                }
                TX_EXTRA_TAG_ADDITIONAL_PUBKEYS => {
                    let (count, varint_len) = decode_varint(body).map_err(|_| truncated())?;
                    let count = usize::try_from(count).map_err(|_| truncated())?;
                    let keys_len = count
                        .checked_mul(PUBLIC_KEY_LENGTH)
                        .ok_or_else(truncated)?;
                    let end = varint_len.checked_add(keys_len).ok_or_else(truncated)?;
                    let keys = body.get(varint_len..end).ok_or_else(truncated)?;
                    let keys = keys.chunks_exact(PUBLIC_KEY_LENGTH).filter_map(read_key).collect();
                    (ExtraRecord::AdditionalPublicKeys(keys), 1 + end)
                }
                _ => return Err(CryptoError::UnknownTag { tag, offset }),
            };

            records.push(record);
            offset += consumed;
        }

        trace!(records = records.len(), "Parsed tx extra");
        Ok(Self { records })
    }

    /// Records in field order
    #[must_use]
    pub fn records(&self) -> &[ExtraRecord] {
        &self.records
    }

    /// Every public key in field order: tag `0x01` keys and additional keys
    #[must_use]
    pub fn public_keys(&self) -> Vec<[u8; PUBLIC_KEY_LENGTH]> {
        self.records
            .iter()
            .flat_map(|record| match record {
                ExtraRecord::PublicKey(key) => vec![*key],
                ExtraRecord::AdditionalPublicKeys(keys) => keys.clone(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// The first payment-ID-carrying nonce, if any
    #[must_use]
    pub fn payment_id_nonce(&self) -> Option<&ExtraNonce> {
        self.records.iter().find_map(|record| match record {
            ExtraRecord::Nonce(
                nonce @ (ExtraNonce::PaymentId(_) | ExtraNonce::EncryptedPaymentId(_)),
            ) => Some(nonce),
            _ => None,
        })
    }
}

fn read_key(bytes: &[u8]) -> Option<[u8; PUBLIC_KEY_LENGTH]> {
    let mut key = [0u8; PUBLIC_KEY_LENGTH];
    key.copy_from_slice(bytes.get(..PUBLIC_KEY_LENGTH)?);
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(fill: u8) -> [u8; 32] {
        [fill; 32]
    }

    #[test]
    fn test_parse_all_record_kinds() {
        let mut extra = vec![TX_EXTRA_TAG_PUBKEY];
        extra.extend_from_slice(&key(0xaa));
        extra.extend_from_slice(&[TX_EXTRA_TAG_NONCE, 9, TX_EXTRA_NONCE_ENCRYPTED_PAYMENT_ID]);
        extra.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        extra.extend_from_slice(&[TX_EXTRA_TAG_ADDITIONAL_PUBKEYS, 2]);
        extra.extend_from_slice(&key(0xbb));
        extra.extend_from_slice(&key(0xcc));
        extra.extend_from_slice(&[0, 0, 0]);

        let field = ExtraField::parse(&extra).unwrap();
        assert_eq!(field.records().len(), 4);
        assert_eq!(field.public_keys(), vec![key(0xaa), key(0xbb), key(0xcc)]);
        assert_eq!(
            field.payment_id_nonce(),
            Some(&ExtraNonce::EncryptedPaymentId([1, 2, 3, 4, 5, 6, 7, 8]))
        );
        assert_eq!(field.records()[3], ExtraRecord::Padding(3));
    }

    #[test]
    fn test_multiple_pubkey_records_are_all_kept() {
        let mut extra = vec![TX_EXTRA_TAG_PUBKEY];
        extra.extend_from_slice(&key(1));
        extra.push(TX_EXTRA_TAG_PUBKEY);
        extra.extend_from_slice(&key(2));
        let field = ExtraField::parse(&extra).unwrap();
        assert_eq!(field.public_keys(), vec![key(1), key(2)]);
    }

    #[test]
    fn test_long_payment_id_nonce() {
        let mut extra = vec![TX_EXTRA_TAG_NONCE, 33, TX_EXTRA_NONCE_PAYMENT_ID];
        extra.extend_from_slice(&key(0x42));
        let field = ExtraField::parse(&extra).unwrap();
        assert_eq!(
            field.payment_id_nonce(),
            Some(&ExtraNonce::PaymentId(key(0x42)))
        );
    }

    #[test]
    fn test_raw_nonce() {
        let field = ExtraField::parse(&[TX_EXTRA_TAG_NONCE, 2, 0xde, 0xad]).unwrap();
        assert_eq!(
            field.records(),
            &[ExtraRecord::Nonce(ExtraNonce::Raw(vec![0xde, 0xad]))]
        );
        assert_eq!(field.payment_id_nonce(), None);
    }

    #[test]
    fn test_empty_extra() {
        let field = ExtraField::parse(&[]).unwrap();
        assert!(field.records().is_empty());
        assert!(field.public_keys().is_empty());
    }

    #[test]
    fn test_over_long_nonce_is_truncated_field() {
        assert_eq!(
            ExtraField::parse(&[TX_EXTRA_TAG_NONCE, 10, 1, 2]),
            Err(CryptoError::TruncatedField {
                tag: TX_EXTRA_TAG_NONCE,
                offset: 0
            })
        );
        assert!(ExtraField::parse(&[TX_EXTRA_TAG_NONCE]).is_err());
    }

    #[test]
    fn test_truncated_keys() {
        let mut extra = vec![TX_EXTRA_TAG_PUBKEY];
        extra.extend_from_slice(&[0u8; 31]);
        assert!(matches!(
            ExtraField::parse(&extra),
            Err(CryptoError::TruncatedField { tag: TX_EXTRA_TAG_PUBKEY, .. })
        ));

        let mut extra = vec![TX_EXTRA_TAG_ADDITIONAL_PUBKEYS, 2];
        extra.extend_from_slice(&key(3));
        assert!(matches!(
            ExtraField::parse(&extra),
            Err(CryptoError::TruncatedField { .. })
        ));
    }

    #[test]
    fn test_unknown_tag_reports_offset() {
        let mut extra = vec![TX_EXTRA_TAG_PUBKEY];
        extra.extend_from_slice(&key(9));
        extra.push(0x03);
        assert_eq!(
            ExtraField::parse(&extra),
            Err(CryptoError::UnknownTag { tag: 0x03, offset: 33 })
        );
    }
}
