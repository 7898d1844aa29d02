//! Environment-driven defaults
//!
//! `MONERO_NETWORK` selects the network (default mainnet) and
//! `ONYX_SEED_LANGUAGE` the mnemonic word list (default English).

use std::env;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::seed::wordlist::{self, WordList};
use crate::types::errors::{CryptoError, CryptoResult};
use crate::types::network::MoneroNetwork;

/// Network selection variable
pub const NETWORK_ENV: &str = "MONERO_NETWORK";

/// Mnemonic language variable
pub const LANGUAGE_ENV: &str = "ONYX_SEED_LANGUAGE";

/// Default mnemonic language
pub const DEFAULT_LANGUAGE: &str = "English";

/// Network and seed language defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletCoreConfig {
    /// Network for derived addresses
    pub network: MoneroNetwork,
    /// Word list language name
    pub language: String,
}

impl Default for WalletCoreConfig {
    fn default() -> Self {
        Self {
            network: MoneroNetwork::Mainnet,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl WalletCoreConfig {
    /// Read the configuration from the process environment
    ///
    /// # Errors
    /// Returns `ConfigError` for an unknown network or language.
    pub fn from_env() -> CryptoResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`
    ///
    /// Unset or empty variables fall back to the defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` for an unknown network or language.
    pub fn from_lookup<F>(lookup: F) -> CryptoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let network = match read(NETWORK_ENV) {
            Some(value) => value.trim().parse()?,
            None => MoneroNetwork::Mainnet,
        };

        let language = read(LANGUAGE_ENV).map_or_else(
            || DEFAULT_LANGUAGE.to_string(),
            |value| value.trim().to_string(),
        );
        let list = wordlist::get(&language).map_err(|_| {
            CryptoError::ConfigError(format!("{LANGUAGE_ENV}: unknown language '{language}'"))
        })?;

        debug!(%network, language = list.english_language_name(), "Loaded wallet core config");
        Ok(Self {
            network,
            language: list.english_language_name().to_string(),
        })
    }

    /// Word list for the configured language
    ///
    /// # Errors
    /// Returns `ConfigError` if the language is not registered.
    pub fn wordlist(&self) -> CryptoResult<&'static WordList> {
        wordlist::get(&self.language)
            .map_err(|_| CryptoError::ConfigError(format!("unknown language '{}'", self.language)))
    }
}
