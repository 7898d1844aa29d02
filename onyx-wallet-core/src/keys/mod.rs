//! Key operations module
//!
//! This module provides:
//! - Public key derivation and key validation against addresses
//! - Account keys built from seeds, secret keys or view-only material
//! - Subaddress derivation

pub mod account;
pub mod derive;

// Re-export account types
pub use account::{AccountKeys, SubaddressIndex};

// Re-export derivation functions
pub use derive::{
    constant_time_compare, derive_public_key, derive_public_key_from_hex,
    validate_view_key_matches_address,
};
