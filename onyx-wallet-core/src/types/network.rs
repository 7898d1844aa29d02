//! Monero network definitions and address layout constants
//!
//! Every address starts with a single network byte that identifies both the
//! network and the kind of address. This module owns that table.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::errors::{CryptoError, CryptoResult};

// =============================================================================
// Network Definition
// =============================================================================

/// Monero network type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneroNetwork {
    /// Mainnet (production network)
    #[default]
    Mainnet,
    /// Testnet (development network)
    Testnet,
    /// Stagenet (testing network with separate blockchain)
    Stagenet,
}

impl MoneroNetwork {
    /// All networks, in netbyte table order
    pub const ALL: [Self; 3] = [Self::Mainnet, Self::Testnet, Self::Stagenet];

    /// Network byte for standard addresses
    #[must_use]
    pub const fn address_prefix(&self) -> u8 {
        match self {
            Self::Mainnet => 18,  // '4'
            Self::Testnet => 53,  // '9'
            Self::Stagenet => 24, // '5'
        }
    }

    /// Network byte for integrated addresses
    #[must_use]
    pub const fn integrated_prefix(&self) -> u8 {
        match self {
            Self::Mainnet => 19,
            Self::Testnet => 54,
            Self::Stagenet => 25,
        }
    }

    /// Network byte for subaddresses
    #[must_use]
    pub const fn subaddress_prefix(&self) -> u8 {
        match self {
            Self::Mainnet => 42,  // '8'
            Self::Testnet => 63,  // 'B'
            Self::Stagenet => 36, // '7'
        }
    }

    /// Network byte for the given address type on this network
    #[must_use]
    pub const fn prefix_for(&self, address_type: AddressType) -> u8 {
        match address_type {
            AddressType::Standard => self.address_prefix(),
            AddressType::Integrated => self.integrated_prefix(),
            AddressType::Subaddress => self.subaddress_prefix(),
        }
    }

    /// Look up a network byte in the netbyte table
    ///
    /// # Errors
    /// Returns `UnknownNetworkByte` if the byte belongs to no network.
    pub fn from_prefix(prefix: u8) -> CryptoResult<(Self, AddressType)> {
        Self::ALL
            .iter()
            .flat_map(|network| {
                [
                    AddressType::Standard,
                    AddressType::Integrated,
                    AddressType::Subaddress,
                ]
                .into_iter()
                .map(move |kind| (*network, kind))
            })
            .find(|(network, kind)| network.prefix_for(*kind) == prefix)
            .ok_or(CryptoError::UnknownNetworkByte(prefix))
    }

    /// Check if this is mainnet
    #[must_use]
    pub const fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }

    /// Check if this is testnet
    #[must_use]
    pub const fn is_testnet(&self) -> bool {
        matches!(self, Self::Testnet)
    }

    /// Check if this is stagenet
    #[must_use]
    pub const fn is_stagenet(&self) -> bool {
        matches!(self, Self::Stagenet)
    }
}

impl FromStr for MoneroNetwork {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            "stagenet" | "stage" => Ok(Self::Stagenet),
            other => Err(CryptoError::ConfigError(format!(
                "unknown network '{other}'"
            ))),
        }
    }
}

impl fmt::Display for MoneroNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Stagenet => write!(f, "stagenet"),
        }
    }
}

// =============================================================================
// Address Types
// =============================================================================

/// Type of Monero address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    /// Standard (master) address
    Standard,
    /// Subaddress (account + address index derivation)
    Subaddress,
    /// Integrated address (standard + 8-byte payment ID)
    Integrated,
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Subaddress => write!(f, "subaddress"),
            Self::Integrated => write!(f, "integrated"),
        }
    }
}

// =============================================================================
// Layout Constants
// =============================================================================

/// Length of a Monero public key in bytes
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a Monero address checksum in bytes
pub const CHECKSUM_LENGTH: usize = 4;

/// Length of the payment ID embedded in integrated addresses
pub const SHORT_PAYMENT_ID_LENGTH: usize = 8;

/// Length of a standard Monero address after base58 decoding
pub const STANDARD_ADDRESS_DECODED_LENGTH: usize = 1 + PUBLIC_KEY_LENGTH * 2 + CHECKSUM_LENGTH; // 69

/// Length of an integrated address after base58 decoding
pub const INTEGRATED_ADDRESS_DECODED_LENGTH: usize =
    1 + PUBLIC_KEY_LENGTH * 2 + SHORT_PAYMENT_ID_LENGTH + CHECKSUM_LENGTH; // 77

/// Length of a standard address or subaddress in base58 characters
pub const STANDARD_ADDRESS_LENGTH: usize = 95;

/// Length of an integrated address in base58 characters
pub const INTEGRATED_ADDRESS_LENGTH: usize = 106;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_prefixes() {
        assert_eq!(MoneroNetwork::Mainnet.address_prefix(), 18);
        assert_eq!(MoneroNetwork::Testnet.integrated_prefix(), 54);
        assert_eq!(MoneroNetwork::Stagenet.subaddress_prefix(), 36);
    }

    #[test]
    fn test_netbyte_table_is_invertible() {
        for network in MoneroNetwork::ALL {
            for kind in [
                AddressType::Standard,
                AddressType::Integrated,
                AddressType::Subaddress,
            ] {
                let prefix = network.prefix_for(kind);
                assert_eq!(MoneroNetwork::from_prefix(prefix).unwrap(), (network, kind));
            }
        }
    }

    #[test]
    fn test_unknown_prefix() {
        assert_eq!(
            MoneroNetwork::from_prefix(0),
            Err(CryptoError::UnknownNetworkByte(0))
        );
        assert!(MoneroNetwork::from_prefix(20).is_err());
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("mainnet".parse::<MoneroNetwork>().unwrap(), MoneroNetwork::Mainnet);
        assert_eq!("STAGENET".parse::<MoneroNetwork>().unwrap(), MoneroNetwork::Stagenet);
        assert_eq!("test".parse::<MoneroNetwork>().unwrap(), MoneroNetwork::Testnet);
        assert!("invalid".parse::<MoneroNetwork>().is_err());
    }

    #[test]
    fn test_network_helpers() {
        assert!(MoneroNetwork::default().is_mainnet());
        assert!(MoneroNetwork::Testnet.is_testnet());
        assert!(!MoneroNetwork::Testnet.is_stagenet());
    }

    #[test]
    fn test_address_type_display() {
        assert_eq!(AddressType::Standard.to_string(), "standard");
        assert_eq!(AddressType::Subaddress.to_string(), "subaddress");
        assert_eq!(AddressType::Integrated.to_string(), "integrated");
    }

    #[test]
    fn test_decoded_lengths() {
        assert_eq!(STANDARD_ADDRESS_DECODED_LENGTH, 69);
        assert_eq!(INTEGRATED_ADDRESS_DECODED_LENGTH, 77);
    }
}
