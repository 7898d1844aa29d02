//! Mnemonic word lists and the language registry
//!
//! A word list is exactly 1626 distinct words plus a unique prefix length.
//! The prefix length only feeds the checksum computation; words themselves
//! are always matched in full.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::english;
use crate::types::errors::{CryptoError, CryptoResult};

/// Number of words in every mnemonic word list
pub const WORD_LIST_SIZE: usize = 1626;

/// A language's mnemonic word list
#[derive(Debug, Clone)]
pub struct WordList {
    language_name: String,
    english_language_name: String,
    unique_prefix_length: usize,
    words: Vec<String>,
    indices: HashMap<String, usize>,
}

impl WordList {
    /// Build a word list, validating its size and uniqueness
    ///
    /// # Errors
    /// Returns `InvalidMnemonic` if the list does not hold exactly 1626
    /// distinct words or the prefix length is zero.
    pub fn new(
        language_name: impl Into<String>,
        english_language_name: impl Into<String>,
        unique_prefix_length: usize,
        words: Vec<String>,
    ) -> CryptoResult<Self> {
        if words.len() != WORD_LIST_SIZE {
            return Err(CryptoError::InvalidMnemonic(format!(
                "word list must have {WORD_LIST_SIZE} words, got {}",
                words.len()
            )));
        }
        if unique_prefix_length == 0 {
            return Err(CryptoError::InvalidMnemonic(
                "unique prefix length must be at least 1".into(),
            ));
        }

        let list = Self::build(
            language_name.into(),
            english_language_name.into(),
            unique_prefix_length,
            words,
        );
        if list.indices.len() != WORD_LIST_SIZE {
            return Err(CryptoError::InvalidMnemonic(format!(
                "word list '{}' contains duplicate words",
                list.english_language_name
            )));
        }
        Ok(list)
    }

    fn build(
        language_name: String,
        english_language_name: String,
        unique_prefix_length: usize,
        words: Vec<String>,
    ) -> Self {
        let indices = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self {
            language_name,
            english_language_name,
            unique_prefix_length,
            words,
            indices,
        }
    }

    /// Name of the language in that language
    #[must_use]
    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    /// Name of the language in English
    #[must_use]
    pub fn english_language_name(&self) -> &str {
        &self.english_language_name
    }

    /// Number of leading characters used when computing the checksum
    #[must_use]
    pub const fn unique_prefix_length(&self) -> usize {
        self.unique_prefix_length
    }

    /// All words, in index order
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Word at `index`
    #[must_use]
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Index of an exact word
    #[must_use]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.indices.get(word).copied()
    }

    /// Position of the checksum word within `words`
    ///
    /// CRC-32 over the concatenated unique prefixes, reduced mod the number
    /// of words.
    #[must_use]
    pub fn checksum_index<S: AsRef<str>>(&self, words: &[S]) -> usize {
        if words.is_empty() {
            return 0;
        }
        let prefixes: String = words
            .iter()
            .flat_map(|w| w.as_ref().chars().take(self.unique_prefix_length))
            .collect();
        crc32fast::hash(prefixes.as_bytes()) as usize % words.len()
    }

    /// Encode hex as a mnemonic phrase in this language
    ///
    /// # Errors
    /// See [`super::mnemonic::encode`].
    pub fn encode(&self, hex_str: &str) -> CryptoResult<String> {
        super::mnemonic::encode(hex_str, self)
    }

    /// Decode a mnemonic phrase in this language to hex
    ///
    /// # Errors
    /// See [`super::mnemonic::decode`].
    pub fn decode(&self, phrase: &str) -> CryptoResult<String> {
        super::mnemonic::decode(phrase, self)
    }
}

// =============================================================================
// Registry
// =============================================================================

static ENGLISH: Lazy<WordList> = Lazy::new(|| {
    WordList::build(
        "English".into(),
        "English".into(),
        3,
        english::WORDS.iter().map(|w| (*w).to_string()).collect(),
    )
});

static REGISTRY: Lazy<Vec<&'static WordList>> = Lazy::new(|| vec![&*ENGLISH]);

/// The built-in English word list
#[must_use]
pub fn english() -> &'static WordList {
    &ENGLISH
}

/// Look up a registered word list by native or English language name
///
/// # Errors
/// Returns `NotSupported` for unregistered languages.
pub fn get(name: &str) -> CryptoResult<&'static WordList> {
    let wanted = name.trim().to_lowercase();
    REGISTRY
        .iter()
        .copied()
        .find(|list| {
            list.english_language_name.to_lowercase() == wanted
                || list.language_name.to_lowercase() == wanted
        })
        .ok_or_else(|| CryptoError::NotSupported(format!("no word list for language '{name}'")))
}

/// English names of all registered languages
#[must_use]
pub fn languages() -> Vec<&'static str> {
    REGISTRY
        .iter()
        .map(|list| list.english_language_name())
        .collect()
}
