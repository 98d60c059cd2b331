//! Cryptographic primitives for grove.
//!
//! - **Blake2b** for hashing
//! - Address encoding with `grove_` prefix, base32 body and checksum
//! - Deterministic group-account address derivation

pub mod address;
pub mod hash;

pub use address::{
    decode_address, derive_group_account_address, encode_address, validate_address,
};
pub use hash::{blake2b_256, blake2b_256_multi};
