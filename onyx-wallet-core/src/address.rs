//! Monero address encoding and decoding
//!
//! # Binary Layout
//!
//! ```text
//! [netbyte:1] [spend_pub:32] [view_pub:32] [payment_id:8]? [checksum:4]
//! ```
//!
//! The checksum is the first 4 bytes of Keccak-256 over everything before it.
//! The whole buffer is then base58-encoded, giving 95 characters for standard
//! addresses and subaddresses and 106 for integrated addresses.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::base58;
use crate::hash::keccak256;
use crate::keys::derive::secret_matches_public;
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::network::{
    AddressType, MoneroNetwork, CHECKSUM_LENGTH, INTEGRATED_ADDRESS_DECODED_LENGTH,
    INTEGRATED_ADDRESS_LENGTH, PUBLIC_KEY_LENGTH, SHORT_PAYMENT_ID_LENGTH,
    STANDARD_ADDRESS_DECODED_LENGTH, STANDARD_ADDRESS_LENGTH,
};
use crate::types::payment_id::PaymentId;

/// Kind of address, with the payload only integrated addresses carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Master address of a wallet
    Standard,
    /// Address derived from an (account, index) pair
    Subaddress,
    /// Standard address with an embedded 8-byte payment ID
    Integrated {
        /// The embedded payment ID
        payment_id: [u8; SHORT_PAYMENT_ID_LENGTH],
    },
}

impl AddressKind {
    /// The payload-free address type
    #[must_use]
    pub const fn address_type(&self) -> AddressType {
        match self {
            Self::Standard => AddressType::Standard,
            Self::Subaddress => AddressType::Subaddress,
            Self::Integrated { .. } => AddressType::Integrated,
        }
    }
}

/// A decoded Monero address
///
/// Two addresses are equal exactly when their canonical text forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoneroAddress {
    network: MoneroNetwork,
    kind: AddressKind,
    spend_key: [u8; PUBLIC_KEY_LENGTH],
    view_key: [u8; PUBLIC_KEY_LENGTH],
}

impl MoneroAddress {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Build an address from its parts
    #[must_use]
    pub const fn new(
        network: MoneroNetwork,
        kind: AddressKind,
        spend_key: [u8; PUBLIC_KEY_LENGTH],
        view_key: [u8; PUBLIC_KEY_LENGTH],
    ) -> Self {
        Self {
            network,
            kind,
            spend_key,
            view_key,
        }
    }

    /// Build a standard (master) address
    #[must_use]
    pub const fn standard(
        network: MoneroNetwork,
        spend_key: [u8; PUBLIC_KEY_LENGTH],
        view_key: [u8; PUBLIC_KEY_LENGTH],
    ) -> Self {
        Self::new(network, AddressKind::Standard, spend_key, view_key)
    }

    /// Build a subaddress
    #[must_use]
    pub const fn subaddress(
        network: MoneroNetwork,
        spend_key: [u8; PUBLIC_KEY_LENGTH],
        view_key: [u8; PUBLIC_KEY_LENGTH],
    ) -> Self {
        Self::new(network, AddressKind::Subaddress, spend_key, view_key)
    }

    /// Build an integrated address
    #[must_use]
    pub const fn integrated(
        network: MoneroNetwork,
        spend_key: [u8; PUBLIC_KEY_LENGTH],
        view_key: [u8; PUBLIC_KEY_LENGTH],
        payment_id: [u8; SHORT_PAYMENT_ID_LENGTH],
    ) -> Self {
        Self::new(
            network,
            AddressKind::Integrated { payment_id },
            spend_key,
            view_key,
        )
    }

    // =========================================================================
    // Binary Form
    // =========================================================================

    /// Decode the binary form (netbyte, keys, optional payment ID, checksum)
    ///
    /// # Errors
    /// - `InvalidFormat` if the length is not 69 or 77 bytes, or does not
    ///   match the kind the netbyte announces
    /// - `ChecksumMismatch` if the trailing checksum is wrong
    /// - `UnknownNetworkByte` if the netbyte is not in the table
    pub fn from_bytes(data: &[u8]) -> CryptoResult<Self> {
        if data.len() != STANDARD_ADDRESS_DECODED_LENGTH
            && data.len() != INTEGRATED_ADDRESS_DECODED_LENGTH
        {
            return Err(CryptoError::InvalidFormat(format!(
                "expected {STANDARD_ADDRESS_DECODED_LENGTH} or {INTEGRATED_ADDRESS_DECODED_LENGTH} bytes, got {}",
                data.len()
            )));
        }

        let split = data.len() - CHECKSUM_LENGTH;
        let (payload, checksum) = data.split_at(split);
        let expected = keccak256(&[payload]);
        if expected[..CHECKSUM_LENGTH] != *checksum {
            return Err(CryptoError::ChecksumMismatch {
                expected: hex::encode(&expected[..CHECKSUM_LENGTH]),
                actual: hex::encode(checksum),
            });
        }

        let (network, address_type) = MoneroNetwork::from_prefix(payload[0])?;

        let mut spend_key = [0u8; PUBLIC_KEY_LENGTH];
        let mut view_key = [0u8; PUBLIC_KEY_LENGTH];
        spend_key.copy_from_slice(&payload[1..=PUBLIC_KEY_LENGTH]);
        view_key.copy_from_slice(&payload[1 + PUBLIC_KEY_LENGTH..1 + 2 * PUBLIC_KEY_LENGTH]);
        let extra = &payload[1 + 2 * PUBLIC_KEY_LENGTH..];

        let kind = match (address_type, extra.len()) {
            (AddressType::Standard, 0) => AddressKind::Standard,
            (AddressType::Subaddress, 0) => AddressKind::Subaddress,
            (AddressType::Integrated, SHORT_PAYMENT_ID_LENGTH) => {
                let mut payment_id = [0u8; SHORT_PAYMENT_ID_LENGTH];
                payment_id.copy_from_slice(extra);
                AddressKind::Integrated { payment_id }
            }
            (address_type, _) => {
                return Err(CryptoError::InvalidFormat(format!(
                    "{address_type} network byte {} with a {}-byte body",
                    payload[0],
                    data.len()
                )))
            }
        };

        trace!(%network, %address_type, "Decoded address");
        Ok(Self::new(network, kind, spend_key, view_key))
    }

    /// Encode the binary form, checksum included
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(INTEGRATED_ADDRESS_DECODED_LENGTH);
        data.push(self.network.prefix_for(self.address_type()));
        data.extend_from_slice(&self.spend_key);
        data.extend_from_slice(&self.view_key);
        if let AddressKind::Integrated { payment_id } = &self.kind {
            data.extend_from_slice(payment_id);
        }
        let checksum = keccak256(&[&data]);
        data.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
        data
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Network this address belongs to
    #[must_use]
    pub const fn network(&self) -> MoneroNetwork {
        self.network
    }

    /// Kind of address, with payload
    #[must_use]
    pub const fn kind(&self) -> AddressKind {
        self.kind
    }

    /// Payload-free address type
    #[must_use]
    pub const fn address_type(&self) -> AddressType {
        self.kind.address_type()
    }

    /// Public spend key
    #[must_use]
    pub const fn spend_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.spend_key
    }

    /// Public view key
    #[must_use]
    pub const fn view_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.view_key
    }

    /// Embedded payment ID, for integrated addresses
    #[must_use]
    pub fn payment_id(&self) -> Option<PaymentId> {
        match self.kind {
            AddressKind::Integrated { payment_id } => Some(PaymentId::from(payment_id)),
            _ => None,
        }
    }

    /// Check if this is a standard address
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        matches!(self.kind, AddressKind::Standard)
    }

    /// Check if this is a subaddress
    #[must_use]
    pub const fn is_subaddress(&self) -> bool {
        matches!(self.kind, AddressKind::Subaddress)
    }

    /// Check if this is an integrated address
    #[must_use]
    pub const fn is_integrated(&self) -> bool {
        matches!(self.kind, AddressKind::Integrated { .. })
    }

    /// Check if this is a mainnet address
    #[must_use]
    pub const fn is_mainnet(&self) -> bool {
        self.network.is_mainnet()
    }

    /// Check if this is a testnet address
    #[must_use]
    pub const fn is_testnet(&self) -> bool {
        self.network.is_testnet()
    }

    /// Check if this is a stagenet address
    #[must_use]
    pub const fn is_stagenet(&self) -> bool {
        self.network.is_stagenet()
    }

    // =========================================================================
    // Derived Addresses
    // =========================================================================

    /// Embed a short payment ID, producing an integrated address
    ///
    /// Integrated addresses have their payment ID replaced.
    ///
    /// # Errors
    /// - `NotSupported` for subaddresses
    /// - `InvalidPaymentId` if the payment ID does not fit in 64 bits
    pub fn with_payment_id(&self, payment_id: PaymentId) -> CryptoResult<Self> {
        if self.is_subaddress() {
            return Err(CryptoError::NotSupported(
                "integrated addresses cannot be built from subaddresses".into(),
            ));
        }
        let short = payment_id.as_short().ok_or_else(|| {
            CryptoError::InvalidPaymentId(format!(
                "integrated addresses need a 64-bit payment ID, got {payment_id}"
            ))
        })?;
        Ok(Self::integrated(
            self.network,
            self.spend_key,
            self.view_key,
            short,
        ))
    }

    /// The standard address behind an integrated address
    ///
    /// Standard addresses and subaddresses are returned unchanged.
    #[must_use]
    pub fn base_address(&self) -> Self {
        match self.kind {
            AddressKind::Integrated { .. } => {
                Self::standard(self.network, self.spend_key, self.view_key)
            }
            _ => self.clone(),
        }
    }

    // =========================================================================
    // Key Checks
    // =========================================================================

    /// Whether `secret_view_key * G` equals this address's view key
    ///
    /// # Errors
    /// Returns `NotSupported` for subaddresses, whose view key is not `a * G`.
    pub fn check_private_view_key(&self, secret_view_key: &[u8; 32]) -> CryptoResult<bool> {
        self.ensure_master("view")?;
        Ok(secret_matches_public(secret_view_key, &self.view_key))
    }

    /// Whether `secret_spend_key * G` equals this address's spend key
    ///
    /// # Errors
    /// Returns `NotSupported` for subaddresses, whose spend key is not `b * G`.
    pub fn check_private_spend_key(&self, secret_spend_key: &[u8; 32]) -> CryptoResult<bool> {
        self.ensure_master("spend")?;
        Ok(secret_matches_public(secret_spend_key, &self.spend_key))
    }

    fn ensure_master(&self, which: &str) -> CryptoResult<()> {
        if self.is_subaddress() {
            return Err(CryptoError::NotSupported(format!(
                "cannot check a private {which} key against a subaddress"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Text Form
// =============================================================================

impl FromStr for MoneroAddress {
    type Err = CryptoError;

    /// Parse a base58 address
    ///
    /// Length or alphabet problems are reported as `InvalidFormat`; the
    /// checksum and netbyte are then validated by [`MoneroAddress::from_bytes`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != STANDARD_ADDRESS_LENGTH && s.len() != INTEGRATED_ADDRESS_LENGTH {
            return Err(CryptoError::InvalidFormat(format!(
                "expected {STANDARD_ADDRESS_LENGTH} or {INTEGRATED_ADDRESS_LENGTH} characters, got {}",
                s.len()
            )));
        }

        let data = base58::decode(s)
            .map_err(|e| CryptoError::InvalidFormat(format!("not a base58 address: {e}")))?;
        Self::from_bytes(&data)
    }
}

impl fmt::Display for MoneroAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58::encode(&self.to_bytes()))
    }
}

impl Serialize for MoneroAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MoneroAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET: &str = "43aeKax1ts4BoEbSyzKVbbDRmc8nsnpZLUpQBYvhUxs3KVrodnaFaBEQMDp69u4VaiEG3LSQXA6M61mXPrztCLuh7PFUAmd";
    const INTEGRATED: &str = "4DHKLPmWW8aBoEbSyzKVbbDRmc8nsnpZLUpQBYvhUxs3KVrodnaFaBEQMDp69u4VaiEG3LSQXA6M61mXPrztCLuhAR6GpL18QNwE8h3TuF";
    const SUBADDRESS: &str = "8AGdpx3eddHTTJA3kvbZiegLb2ZP2fGY2eWw5PTbQfo15HrRcJYDnVAMqzLoqD9oGf6krrzS2xgrGM7rMR76zfTPBRu4yKj";

    #[test]
    fn test_parse_standard() {
        let addr: MoneroAddress = MAINNET.parse().unwrap();
        assert_eq!(addr.network(), MoneroNetwork::Mainnet);
        assert!(addr.is_standard());
        assert_eq!(
            hex::encode(addr.spend_key()),
            "33a7ceb933b793408d49e82c0a34664a4be7117243cb77a64ef280b866d8aa6e"
        );
        assert_eq!(
            hex::encode(addr.view_key()),
            "96f70d63d9d3558b97a5dd200a170b4f45b3177a274aa90496ea683896ff6438"
        );
        assert_eq!(addr.to_string(), MAINNET);
        assert_eq!(addr.payment_id(), None);
    }

    #[test]
    fn test_integrated_round_trip() {
        let addr: MoneroAddress = MAINNET.parse().unwrap();
        let pid = PaymentId::from_hex("4a6f686e47616c74").unwrap();
        let integrated = addr.with_payment_id(pid).unwrap();
        assert_eq!(integrated.to_string(), INTEGRATED);
        assert_eq!(integrated.payment_id(), Some(pid));
        assert_eq!(integrated.base_address(), addr);

        let parsed: MoneroAddress = INTEGRATED.parse().unwrap();
        assert_eq!(parsed, integrated);
        assert_eq!(parsed.address_type(), AddressType::Integrated);
    }

    #[test]
    fn test_long_payment_id_rejected() {
        let addr: MoneroAddress = MAINNET.parse().unwrap();
        let long = PaymentId::from_hex(&format!("1{}", "0".repeat(63))).unwrap();
        assert!(matches!(
            addr.with_payment_id(long),
            Err(CryptoError::InvalidPaymentId(_))
        ));
    }

    #[test]
    fn test_subaddress_restrictions() {
        let sub: MoneroAddress = SUBADDRESS.parse().unwrap();
        assert!(sub.is_subaddress());
        assert!(matches!(
            sub.with_payment_id(PaymentId::from(1u64)),
            Err(CryptoError::NotSupported(_))
        ));
        assert!(matches!(
            sub.check_private_view_key(&[1u8; 32]),
            Err(CryptoError::NotSupported(_))
        ));
        assert_eq!(sub.base_address(), sub);
    }

    #[test]
    fn test_bad_length_is_invalid_format() {
        assert!(matches!(
            MoneroAddress::from_str(&MAINNET[..94]),
            Err(CryptoError::InvalidFormat(_))
        ));
        assert!(matches!(
            MoneroAddress::from_bytes(&[18u8; 70]),
            Err(CryptoError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_bad_charset_is_invalid_format() {
        let bad = format!("0{}", &MAINNET[1..]);
        assert!(matches!(
            MoneroAddress::from_str(&bad),
            Err(CryptoError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut bytes = MoneroAddress::from_str(MAINNET).unwrap().to_bytes();
        bytes[10] ^= 1;
        assert!(matches!(
            MoneroAddress::from_bytes(&bytes),
            Err(CryptoError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_netbyte() {
        let mut payload = vec![7u8];
        payload.extend_from_slice(&[0u8; 64]);
        let checksum = keccak256(&[&payload]);
        payload.extend_from_slice(&checksum[..4]);
        assert_eq!(
            MoneroAddress::from_bytes(&payload),
            Err(CryptoError::UnknownNetworkByte(7))
        );
    }

    #[test]
    fn test_integrated_netbyte_with_standard_length() {
        let mut payload = vec![MoneroNetwork::Mainnet.integrated_prefix()];
        payload.extend_from_slice(&[0u8; 64]);
        let checksum = keccak256(&[&payload]);
        payload.extend_from_slice(&checksum[..4]);
        assert!(matches!(
            MoneroAddress::from_bytes(&payload),
            Err(CryptoError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let addr: MoneroAddress = MAINNET.parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{MAINNET}\""));
        let back: MoneroAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
