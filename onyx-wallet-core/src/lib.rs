//! # onyx-wallet-core
//!
//! Monero wallet primitives for Onyx: addresses, mnemonic seeds, account and
//! subaddress keys, and view-key output scanning.
//!
//! ## Modules
//!
//! - [`types`]: Error type, network table and payment IDs
//! - [`base58`]: Monero block base58 with optional Keccak checksum
//! - [`address`]: Standard, integrated and subaddress encoding
//! - [`seed`]: Mnemonic phrases and pluggable word lists
//! - [`keys`]: Key derivation, account keys and subaddresses
//! - [`scan`]: Extra field parsing and output recognition
//! - [`config`]: Environment-driven network and language defaults
//!
//! ## Example
//!
//! ```rust
//! use onyx_wallet_core::prelude::*;
//!
//! let seed = Seed::from_phrase(
//!     "adjust mugged vaults atlas nasty mews damp toenail suddenly toxic possible \
//!      framed succeed fuzzy return demonstrate nucleus album noises peculiar virtual \
//!      rowboat inorganic jester fuzzy",
//! )?;
//! let account = seed.account(MoneroNetwork::Mainnet);
//! let subaddress = account.subaddress(0, 1)?;
//! assert!(subaddress.is_subaddress());
//! # Ok::<(), CryptoError>(())
//! ```
//!
//! ## Security Considerations
//!
//! - Secret keys and seed bytes are zeroized on drop and never logged
//! - `Debug` output of secret-holding types is redacted

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod address;
pub mod base58;
pub mod config;
pub mod hash;
pub mod keys;
pub mod scan;
pub mod seed;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::address::{AddressKind, MoneroAddress};
    pub use crate::config::WalletCoreConfig;
    pub use crate::keys::{AccountKeys, SubaddressIndex};
    pub use crate::scan::{scan_outputs, ExtraField, OwnedOutput, ScannedOutput, Transaction};
    pub use crate::seed::{Seed, WordList};
    pub use crate::types::errors::*;
    pub use crate::types::*;
}

/// Re-export commonly used types at crate root
pub use types::errors::{CryptoError, CryptoResult};

// Re-export address types
pub use address::{AddressKind, MoneroAddress};
pub use types::network::{AddressType, MoneroNetwork};
pub use types::payment_id::PaymentId;

// Re-export key and seed types
pub use keys::{AccountKeys, SubaddressIndex};
pub use seed::Seed;

// Re-export scanning entry points
pub use scan::{scan_outputs, scan_transaction_json, OwnedOutput, ScannedOutput, Transaction};

pub use config::WalletCoreConfig;
