//! Payment identifiers
//!
//! A payment ID is an unsigned integer of at most 256 bits. Values that fit in
//! 64 bits are "short" and are the only ones an integrated address can carry.
//! The textual form is zero-padded hex: 16 digits when short, 64 otherwise.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::errors::{CryptoError, CryptoResult};

/// Width of a long payment ID in bytes
pub const LONG_PAYMENT_ID_LENGTH: usize = 32;

/// Payment ID stored as a fixed-width big-endian integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaymentId([u8; LONG_PAYMENT_ID_LENGTH]);

impl PaymentId {
    /// Parse a payment ID from up to 64 hex digits
    ///
    /// # Errors
    /// Returns `InvalidPaymentId` for empty, over-long or non-hex input.
    pub fn from_hex(text: &str) -> CryptoResult<Self> {
        let text = text.trim();
        if text.is_empty() || text.len() > LONG_PAYMENT_ID_LENGTH * 2 {
            return Err(CryptoError::InvalidPaymentId(format!(
                "expected 1 to 64 hex digits, got {}",
                text.len()
            )));
        }

        let padded = format!("{text:0>64}");
        let mut bytes = [0u8; LONG_PAYMENT_ID_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| CryptoError::InvalidPaymentId(format!("not hex: {e}")))?;
        Ok(Self(bytes))
    }

    /// Build a payment ID from an 8-byte or 32-byte big-endian value
    ///
    /// # Errors
    /// Returns `InvalidPaymentId` for any other width.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let mut value = [0u8; LONG_PAYMENT_ID_LENGTH];
        match bytes.len() {
            8 => value[24..].copy_from_slice(bytes),
            LONG_PAYMENT_ID_LENGTH => value.copy_from_slice(bytes),
            other => {
                return Err(CryptoError::InvalidPaymentId(format!(
                    "expected 8 or 32 bytes, got {other}"
                )))
            }
        }
        Ok(Self(value))
    }

    /// Whether the value fits in 64 bits
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.0[..24].iter().all(|b| *b == 0)
    }

    /// The 8-byte big-endian form, if the value is short
    #[must_use]
    pub fn as_short(&self) -> Option<[u8; 8]> {
        if !self.is_short() {
            return None;
        }
        let mut short = [0u8; 8];
        short.copy_from_slice(&self.0[24..]);
        Some(short)
    }

    /// The full 32-byte big-endian value
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; LONG_PAYMENT_ID_LENGTH] {
        self.0
    }
}

impl From<u64> for PaymentId {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; LONG_PAYMENT_ID_LENGTH];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<[u8; 8]> for PaymentId {
    fn from(short: [u8; 8]) -> Self {
        let mut bytes = [0u8; LONG_PAYMENT_ID_LENGTH];
        bytes[24..].copy_from_slice(&short);
        Self(bytes)
    }
}

impl FromStr for PaymentId {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_short() {
            Some(short) => f.write_str(&hex::encode(short)),
            None => f.write_str(&hex::encode(self.0)),
        }
    }
}

impl Serialize for PaymentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PaymentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_payment_id() {
        let pid = PaymentId::from_hex("4a6f686e47616c74").unwrap();
        assert!(pid.is_short());
        assert_eq!(pid.to_string(), "4a6f686e47616c74");
        assert_eq!(pid.as_short(), Some(*b"JohnGalt"));
    }

    #[test]
    fn test_width_follows_value_not_input() {
        let long_text = format!("{:0>64}", "5");
        let pid = PaymentId::from_hex(&long_text).unwrap();
        assert!(pid.is_short());
        assert_eq!(pid, PaymentId::from(5u64));
        assert_eq!(pid.to_string(), "0000000000000005");
    }

    #[test]
    fn test_long_payment_id() {
        let text = "1000000000000000000000000000000000000000000000000000000000000001";
        let pid: PaymentId = text.parse().unwrap();
        assert!(!pid.is_short());
        assert_eq!(pid.as_short(), None);
        assert_eq!(pid.to_string(), text);
    }

    #[test]
    fn test_invalid_payment_ids() {
        assert!(PaymentId::from_hex("").is_err());
        assert!(PaymentId::from_hex("xyz").is_err());
        assert!(PaymentId::from_hex(&"1".repeat(65)).is_err());
        assert!(PaymentId::from_bytes(&[0u8; 16]).is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let pid = PaymentId::from(0xdead_beef_u64);
        let json = serde_json::to_string(&pid).unwrap();
        assert_eq!(json, "\"00000000deadbeef\"");
        let back: PaymentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pid);
    }
}
