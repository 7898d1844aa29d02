//! Wallet account keys and subaddress derivation
//!
//! An account is a secret view scalar `a`, a public spend point `B` and,
//! unless view-only, the secret spend scalar `b`. Subaddress `(major, minor)`
//! is derived as:
//!
//! ```text
//! m = Hs("SubAddr\0" || a || u32le(major) || u32le(minor))
//! D = B + m*G          (subaddress spend key)
//! C = a*D              (subaddress view key)
//! ```
//!
//! Index `(0, 0)` is the master address itself.

use core::fmt;

use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use zeroize::Zeroize;

use super::derive::{decompress_point, public_point};
use crate::address::MoneroAddress;
use crate::hash::{hash_to_scalar, keccak256};
use crate::seed::Seed;
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::network::MoneroNetwork;

/// Domain separator for subaddress secrets, NUL included
const SUBADDRESS_DOMAIN: &[u8; 8] = b"SubAddr\0";

// =============================================================================
// Subaddress Index
// =============================================================================

/// `(major, minor)` subaddress index
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SubaddressIndex {
    /// Account index
    pub major: u32,
    /// Address index within the account
    pub minor: u32,
}

impl SubaddressIndex {
    /// Validate a pair of signed indices
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if either value is negative or above `u32::MAX`.
    pub fn new(major: i64, minor: i64) -> CryptoResult<Self> {
        Ok(Self {
            major: checked_index("major", major)?,
            minor: checked_index("minor", minor)?,
        })
    }

    /// Whether this is `(0, 0)`, the master address
    #[must_use]
    pub const fn is_master(&self) -> bool {
        self.major == 0 && self.minor == 0
    }
}

fn checked_index(field: &str, value: i64) -> CryptoResult<u32> {
    u32::try_from(value).map_err(|_| CryptoError::IndexOutOfRange {
        field: field.into(),
        value,
    })
}

impl fmt::Display for SubaddressIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.major, self.minor)
    }
}

// =============================================================================
// Account Keys
// =============================================================================

/// Keys of a single wallet account
pub struct AccountKeys {
    network: MoneroNetwork,
    secret_spend: Option<Scalar>,
    secret_view: Scalar,
    public_spend: EdwardsPoint,
    public_view: EdwardsPoint,
}

/// Secret spend scalar of a seed
///
/// `reduce(seed)` for 32-byte seeds, `reduce(keccak(seed))` for 16-byte ones.
pub(crate) fn seed_spend_scalar(seed: &Seed) -> Scalar {
    let mut raw = if seed.is_short() {
        keccak256(&[seed.as_bytes()])
    } else {
        let mut raw = [0u8; 32];
        raw.copy_from_slice(seed.as_bytes());
        raw
    };
    let spend = Scalar::from_bytes_mod_order(raw);
    raw.zeroize();
    spend
}

impl AccountKeys {
    /// Derive account keys from a seed
    ///
    /// 32-byte seeds use the reduced seed as the spend key and
    /// `Hs(spend)` as the view key. Legacy 16-byte seeds are hashed first:
    /// `spend = Hs(seed)`, `view = Hs(keccak(seed))`.
    #[must_use]
    pub fn from_seed(seed: &Seed, network: MoneroNetwork) -> Self {
        let spend = seed_spend_scalar(seed);
        let view = if seed.is_short() {
            let mut first = keccak256(&[seed.as_bytes()]);
            let view = hash_to_scalar(&[&first]);
            first.zeroize();
            view
        } else {
            hash_to_scalar(&[spend.as_bytes()])
        };
        Self::from_scalars(spend, view, network)
    }

    /// Full account from a secret spend key, deriving the view key
    #[must_use]
    pub fn from_secret_spend_key(secret_spend_key: &[u8; 32], network: MoneroNetwork) -> Self {
        let spend = Scalar::from_bytes_mod_order(*secret_spend_key);
        let view = hash_to_scalar(&[spend.as_bytes()]);
        Self::from_scalars(spend, view, network)
    }

    /// Full account from both secret keys
    #[must_use]
    pub fn from_secret_keys(
        secret_spend_key: &[u8; 32],
        secret_view_key: &[u8; 32],
        network: MoneroNetwork,
    ) -> Self {
        Self::from_scalars(
            Scalar::from_bytes_mod_order(*secret_spend_key),
            Scalar::from_bytes_mod_order(*secret_view_key),
            network,
        )
    }

    fn from_scalars(spend: Scalar, view: Scalar, network: MoneroNetwork) -> Self {
        Self {
            network,
            public_spend: public_point(&spend),
            public_view: public_point(&view),
            secret_spend: Some(spend),
            secret_view: view,
        }
    }

    /// View-only account from the secret view key and public spend key
    ///
    /// # Errors
    /// Returns `InvalidPublicKey` if the spend key is not a valid point.
    pub fn view_only(
        secret_view_key: &[u8; 32],
        public_spend_key: &[u8; 32],
        network: MoneroNetwork,
    ) -> CryptoResult<Self> {
        let view = Scalar::from_bytes_mod_order(*secret_view_key);
        Ok(Self {
            network,
            secret_spend: None,
            public_spend: decompress_point(public_spend_key, "public spend key")?,
            public_view: public_point(&view),
            secret_view: view,
        })
    }

    /// View-only account for a master address
    ///
    /// # Errors
    /// - `NotSupported` for subaddresses
    /// - `InvalidSecretKey` if the view key does not belong to the address
    pub fn from_address(address: &MoneroAddress, secret_view_key: &[u8; 32]) -> CryptoResult<Self> {
        if !address.check_private_view_key(secret_view_key)? {
            return Err(CryptoError::InvalidSecretKey(
                "view key does not match the address".into(),
            ));
        }
        Self::view_only(secret_view_key, address.spend_key(), address.network())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Network addresses are generated for
    #[must_use]
    pub const fn network(&self) -> MoneroNetwork {
        self.network
    }

    /// Whether the secret spend key is absent
    #[must_use]
    pub const fn is_view_only(&self) -> bool {
        self.secret_spend.is_none()
    }

    /// Secret spend key, unless view-only
    #[must_use]
    pub fn secret_spend_key(&self) -> Option<[u8; 32]> {
        self.secret_spend.map(|s| s.to_bytes())
    }

    /// Secret view key
    #[must_use]
    pub fn secret_view_key(&self) -> [u8; 32] {
        self.secret_view.to_bytes()
    }

    /// Public spend key
    #[must_use]
    pub fn public_spend_key(&self) -> [u8; 32] {
        self.public_spend.compress().to_bytes()
    }

    /// Public view key
    #[must_use]
    pub fn public_view_key(&self) -> [u8; 32] {
        self.public_view.compress().to_bytes()
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    /// Master (standard) address
    #[must_use]
    pub fn address(&self) -> MoneroAddress {
        MoneroAddress::standard(
            self.network,
            self.public_spend_key(),
            self.public_view_key(),
        )
    }

    /// Subaddress at `(major, minor)`; `(0, 0)` is the master address
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if either index is negative or above `u32::MAX`.
    pub fn subaddress(&self, major: i64, minor: i64) -> CryptoResult<MoneroAddress> {
        Ok(self.subaddress_at(SubaddressIndex::new(major, minor)?))
    }

    /// Subaddress at a validated index
    #[must_use]
    pub fn subaddress_at(&self, index: SubaddressIndex) -> MoneroAddress {
        if index.is_master() {
            return self.address();
        }

        let m = hash_to_scalar(&[
            SUBADDRESS_DOMAIN,
            self.secret_view.as_bytes(),
            &index.major.to_le_bytes(),
            &index.minor.to_le_bytes(),
        ]);
        let spend = self.public_spend + public_point(&m);
        let view = self.secret_view * spend;
        trace!(%index, "Derived subaddress");

        MoneroAddress::subaddress(
            self.network,
            spend.compress().to_bytes(),
            view.compress().to_bytes(),
        )
    }

    /// Every address for `accounts` accounts of `per_account` addresses each
    ///
    /// Index `(0, 0)` yields the master address. The result is ordered by
    /// major, then minor index.
    #[must_use]
    pub fn subaddresses(
        &self,
        accounts: u32,
        per_account: u32,
    ) -> Vec<(SubaddressIndex, MoneroAddress)> {
        let table: Vec<_> = (0..accounts)
            .flat_map(|major| (0..per_account).map(move |minor| SubaddressIndex { major, minor }))
            .map(|index| (index, self.subaddress_at(index)))
            .collect();
        debug!(accounts, per_account, count = table.len(), "Generated subaddress table");
        table
    }
}

impl Drop for AccountKeys {
    fn drop(&mut self) {
        self.secret_view.zeroize();
        self.secret_spend.zeroize();
    }
}

impl fmt::Debug for AccountKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountKeys")
            .field("network", &self.network)
            .field("view_only", &self.is_view_only())
            .field("public_spend", &hex::encode(self.public_spend_key()))
            .field("public_view", &hex::encode(self.public_view_key()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_HEX: &str = "482700617ba810f94035d7f4d7ccc1a29878e165b4867872b705204c85406906";

    fn account() -> AccountKeys {
        Seed::from_hex(SEED_HEX).unwrap().account(MoneroNetwork::Mainnet)
    }

    #[test]
    fn test_keys_from_seed() {
        let keys = account();
        assert_eq!(hex::encode(keys.secret_spend_key().unwrap()), SEED_HEX);
        assert_eq!(
            hex::encode(keys.secret_view_key()),
            "09ed72c713d3e9e19bef2f5204cf85f6cb25de7842aa0722abeb12697f171903"
        );
        assert_eq!(
            hex::encode(keys.public_spend_key()),
            "4ee576f52b9c6a824a3d5c2832d117177d2bb9992507c2c78788bb8dbaf4b640"
        );
        assert_eq!(
            hex::encode(keys.public_view_key()),
            "e1ef99d66312ec0b16b17c66c591ab59594e21621588b63b62fa69fe615a768e"
        );
    }

    #[test]
    fn test_short_seed_keys() {
        let seed = Seed::from_hex("932d70711acc2d536ca11fcb79e05516").unwrap();
        let keys = seed.account(MoneroNetwork::Mainnet);
        assert_eq!(
            hex::encode(keys.secret_spend_key().unwrap()),
            "f6d4f736f714a444c2ffe1f01a3fcc1c85a3f4441f2b436e7aef2807b93f4c00"
        );
        assert_eq!(
            hex::encode(keys.secret_view_key()),
            "3d86d7b8f9eb0086a8afb2468d38380f5aa964f8b96cd2aeeafcbce6c6edad07"
        );
        assert_eq!(
            keys.address().to_string(),
            "45Qf5G3Bk1HUtkfxhPJBRvJCGhxEZXcfs23AM6a4rC33dhvsZTSxmGu1T8CJJyaijUP46DWz1quYEZvf2XihRMna6WzS8xZ"
        );
    }

    #[test]
    fn test_master_subaddress_is_address() {
        let keys = account();
        assert_eq!(keys.subaddress(0, 0).unwrap(), keys.address());
    }

    #[test]
    fn test_subaddress_vector() {
        let sub = account().subaddress(0, 1).unwrap();
        assert!(sub.is_subaddress());
        assert_eq!(
            hex::encode(sub.spend_key()),
            "ce46cbcf5c1d509e2786c3636ec56feb2f4bb69f6f1563e04b40b93a75553c19"
        );
        assert_eq!(
            hex::encode(sub.view_key()),
            "a6cbd09f7fcbe57c9f35930a616c04226a012af7b15dad78474387e0bfb44a5c"
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let keys = account();
        assert!(matches!(
            keys.subaddress(-1, 0),
            Err(CryptoError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            keys.subaddress(0, -1),
            Err(CryptoError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            keys.subaddress(i64::from(u32::MAX) + 1, 0),
            Err(CryptoError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            keys.subaddress(0, i64::from(u32::MAX) + 1),
            Err(CryptoError::IndexOutOfRange { .. })
        ));
        assert!(keys.subaddress(0, i64::from(u32::MAX)).is_ok());
        assert!(keys.subaddress(i64::from(u32::MAX), 0).is_ok());
    }

    #[test]
    fn test_view_only_matches_full() {
        let full = account();
        let view_only = AccountKeys::from_address(&full.address(), &full.secret_view_key()).unwrap();
        assert!(view_only.is_view_only());
        assert_eq!(view_only.secret_spend_key(), None);
        assert_eq!(view_only.subaddress(3, 9).unwrap(), full.subaddress(3, 9).unwrap());
    }

    #[test]
    fn test_from_address_rejects_wrong_view_key() {
        let full = account();
        assert!(matches!(
            AccountKeys::from_address(&full.address(), &[7u8; 32]),
            Err(CryptoError::InvalidSecretKey(_))
        ));
    }

    #[test]
    fn test_from_secret_spend_key_matches_seed() {
        let spend = account().secret_spend_key().unwrap();
        let keys = AccountKeys::from_secret_spend_key(&spend, MoneroNetwork::Mainnet);
        assert_eq!(keys.address(), account().address());
    }

    #[test]
    fn test_subaddress_table() {
        let keys = account();
        let table = keys.subaddresses(2, 3);
        assert_eq!(table.len(), 6);
        assert_eq!(table[0].1, keys.address());
        assert_eq!(table[4].0, SubaddressIndex { major: 1, minor: 1 });
        assert_eq!(table[4].0.to_string(), "1/1");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let keys = account();
        let rendered = format!("{keys:?}");
        assert!(!rendered.contains(SEED_HEX));
    }
}
