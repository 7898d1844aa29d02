//! Core type definitions for onyx-wallet-core
//!
//! This module contains:
//! - Error types shared by every operation
//! - Network definitions and the netbyte table
//! - Payment identifiers

pub mod errors;
pub mod network;
pub mod payment_id;

// Re-export error types
pub use errors::{CryptoError, CryptoResult};

// Re-export network types
pub use network::{
    AddressType, MoneroNetwork, CHECKSUM_LENGTH, INTEGRATED_ADDRESS_DECODED_LENGTH,
    INTEGRATED_ADDRESS_LENGTH, PUBLIC_KEY_LENGTH, SHORT_PAYMENT_ID_LENGTH,
    STANDARD_ADDRESS_DECODED_LENGTH, STANDARD_ADDRESS_LENGTH,
};

// Re-export payment ID
pub use payment_id::PaymentId;
