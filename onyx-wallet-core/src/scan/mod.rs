//! Transaction output scanning
//!
//! Recognizes which outputs of a transaction belong to a set of known
//! addresses using only the secret view key.
//!
//! # Cryptographic Background
//!
//! The sender publishes `R = r*G`. The recipient recomputes the shared
//! derivation `8*a*R`, hashes it with the output index into `Hs_i`, and
//! checks whether `Hs_i*G + B` equals the output key for some candidate
//! spend key `B`. Amounts of `RingCT` outputs are recovered by XORing the
//! encrypted amount with `keccak("amount" || Hs_i)`.

pub mod amounts;
pub mod derivation;
pub mod extra;
pub mod outputs;
pub mod transaction;
pub mod varint;

// Re-export main functions
pub use amounts::{decrypt_amount, decrypt_payment_id};
pub use derivation::{
    compute_view_tag, derivation_to_scalar, derive_output_public_key, generate_key_derivation,
};
pub use extra::{ExtraField, ExtraNonce, ExtraRecord};
pub use outputs::{scan_outputs, scan_transaction_json, OwnedOutput, ScannedOutput};
pub use transaction::{OutputTarget, RawExtra, RctSignatures, Transaction, TxInput, TxOutput};
pub use varint::{decode_varint, encode_varint};
