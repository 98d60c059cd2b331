//! Deterministic addresses for tests.

use grove_crypto::{blake2b_256, encode_address};
use grove_types::Address;

/// A valid, checksummed address derived from `seed`. The same seed always
/// yields the same address.
pub fn null_address(seed: &str) -> Address {
    encode_address(&blake2b_256(seed.as_bytes()))
}
