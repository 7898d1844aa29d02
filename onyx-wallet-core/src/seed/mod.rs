//! Wallet seeds and mnemonic phrases
//!
//! A [`Seed`] holds a 16-byte (legacy 13-word) or 32-byte (25-word) secret
//! and renders it as a mnemonic in a chosen [`WordList`]. The phrase is
//! computed on first use and is always the encoding of the stored secret.
//!
//! ```rust
//! use onyx_wallet_core::seed::Seed;
//!
//! let seed = Seed::from_hex("482700617ba810f94035d7f4d7ccc1a29878e165b4867872b705204c85406906")?;
//! assert_eq!(seed.phrase().split(' ').count(), 25);
//! assert_eq!(Seed::from_phrase(seed.phrase())?.hex(), seed.hex());
//! # Ok::<(), onyx_wallet_core::CryptoError>(())
//! ```

mod english;
pub mod mnemonic;
pub mod wordlist;

use core::fmt;

use curve25519_dalek::scalar::Scalar;
use once_cell::sync::OnceCell;
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::address::MoneroAddress;
use crate::keys::account::{seed_spend_scalar, AccountKeys};
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::network::MoneroNetwork;

pub use wordlist::{WordList, WORD_LIST_SIZE};

/// Secret length of a standard 25-word seed
pub const SEED_LENGTH: usize = 32;

/// Secret length of a legacy 13-word seed
pub const SHORT_SEED_LENGTH: usize = 16;

/// A wallet seed and its mnemonic rendering
#[derive(Clone)]
pub struct Seed {
    secret: Zeroizing<Vec<u8>>,
    wordlist: &'static WordList,
    phrase: OnceCell<Zeroizing<String>>,
}

impl Seed {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Generate a fresh 32-byte seed, reduced to a canonical scalar
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut raw = [0u8; SEED_LENGTH];
        rng.fill_bytes(&mut raw);
        let secret = Zeroizing::new(Scalar::from_bytes_mod_order(raw).to_bytes().to_vec());
        raw.zeroize();
        debug!("Generated new wallet seed");
        Self::from_secret(secret, wordlist::english())
    }

    /// Seed from 32 or 64 hex digits
    ///
    /// # Errors
    /// - `InvalidLength` for any other length
    /// - `InvalidEncoding` if the text is not hex
    pub fn from_hex(hex_str: &str) -> CryptoResult<Self> {
        let hex_str = hex_str.trim();
        check_hex_length(hex_str)?;
        let secret = hex::decode(hex_str)
            .map_err(|e| CryptoError::InvalidEncoding(format!("seed is not hex: {e}")))?;
        Ok(Self::from_secret(Zeroizing::new(secret), wordlist::english()))
    }

    /// Seed from an English mnemonic phrase
    ///
    /// # Errors
    /// See [`Seed::from_phrase_in`].
    pub fn from_phrase(phrase: &str) -> CryptoResult<Self> {
        Self::from_phrase_in(phrase, wordlist::english())
    }

    /// Seed from a mnemonic phrase in the given word list
    ///
    /// Bare hex is passed through by [`mnemonic::decode`] and must then be 32
    /// or 64 digits like any other seed.
    ///
    /// # Errors
    /// - Any error from [`mnemonic::decode`]
    /// - `InvalidLength` if the decoded secret is not 16 or 32 bytes
    pub fn from_phrase_in(phrase: &str, wordlist: &'static WordList) -> CryptoResult<Self> {
        let hex_str = Zeroizing::new(mnemonic::decode(phrase, wordlist)?);
        check_hex_length(&hex_str)?;
        let secret = hex::decode(hex_str.as_str())
            .map_err(|e| CryptoError::InvalidEncoding(format!("decoded seed is not hex: {e}")))?;
        Ok(Self::from_secret(Zeroizing::new(secret), wordlist))
    }

    /// Seed from either a mnemonic phrase or bare hex
    ///
    /// A single token of hex digits whose length is a multiple of 8 is taken
    /// as hex, anything else as an English phrase.
    ///
    /// # Errors
    /// See [`Seed::from_phrase_in`].
    pub fn parse(input: &str) -> CryptoResult<Self> {
        Self::from_phrase(input)
    }

    fn from_secret(secret: Zeroizing<Vec<u8>>, wordlist: &'static WordList) -> Self {
        Self {
            secret,
            wordlist,
            phrase: OnceCell::new(),
        }
    }

    /// Render the same secret in another word list
    #[must_use]
    pub fn with_wordlist(mut self, wordlist: &'static WordList) -> Self {
        self.wordlist = wordlist;
        self.phrase = OnceCell::new();
        self
    }

    // =========================================================================
    // Representations
    // =========================================================================

    /// The mnemonic phrase, checksum word included
    #[must_use]
    pub fn phrase(&self) -> &str {
        self.phrase
            .get_or_init(|| Zeroizing::new(mnemonic::encode_bytes(&self.secret, self.wordlist)))
            .as_str()
    }

    /// The secret as lowercase hex
    #[must_use]
    pub fn hex(&self) -> String {
        hex::encode(self.secret.as_slice())
    }

    /// The raw secret bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    /// Whether this is a legacy 16-byte seed
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.secret.len() == SHORT_SEED_LENGTH
    }

    /// Word list used to render the phrase
    #[must_use]
    pub fn wordlist(&self) -> &'static WordList {
        self.wordlist
    }

    // =========================================================================
    // Keys
    // =========================================================================

    /// Account keys derived from this seed
    #[must_use]
    pub fn account(&self, network: MoneroNetwork) -> AccountKeys {
        AccountKeys::from_seed(self, network)
    }

    /// Secret spend key
    #[must_use]
    pub fn secret_spend_key(&self) -> [u8; 32] {
        seed_spend_scalar(self).to_bytes()
    }

    /// Secret view key
    #[must_use]
    pub fn secret_view_key(&self) -> [u8; 32] {
        self.account(MoneroNetwork::default()).secret_view_key()
    }

    /// Public spend key
    #[must_use]
    pub fn public_spend_key(&self) -> [u8; 32] {
        self.account(MoneroNetwork::default()).public_spend_key()
    }

    /// Public view key
    #[must_use]
    pub fn public_view_key(&self) -> [u8; 32] {
        self.account(MoneroNetwork::default()).public_view_key()
    }

    /// Master address on `network`
    #[must_use]
    pub fn public_address(&self, network: MoneroNetwork) -> MoneroAddress {
        self.account(network).address()
    }
}

/// Secrets are 16 or 32 bytes, so their hex is 32 or 64 digits
fn check_hex_length(hex_str: &str) -> CryptoResult<()> {
    if hex_str.len() == SHORT_SEED_LENGTH * 2 || hex_str.len() == SEED_LENGTH * 2 {
        return Ok(());
    }
    Err(CryptoError::InvalidLength {
        field: "seed hex".into(),
        expected: SEED_LENGTH * 2,
        actual: hex_str.len(),
    })
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("language", &self.wordlist.english_language_name())
            .field("short", &self.is_short())
            .finish_non_exhaustive()
    }
}
