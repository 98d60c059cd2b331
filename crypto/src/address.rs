//! Address encoding and group-account address derivation.
//!
//! Address format: `grove_` + base32(payload, 52 chars) + base32(checksum, 8 chars)
//!
//! The payload is 32 bytes: a member's account key, or for a group account
//! the Blake2b-256 digest of its group id and derivation key. The checksum is
//! the first 5 bytes of Blake2b-256(payload).

use crate::hash::{blake2b_256, blake2b_256_multi};
use grove_types::Address;

/// Base32 alphabet (avoids visually ambiguous 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[BASE32_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

const PAYLOAD_CHARS: usize = 52;
const CHECKSUM_CHARS: usize = 8;

/// Domain separator for group-account derivation.
const GROUP_ACCOUNT_DOMAIN: &[u8] = b"grove/group-account";

fn encode_base32(bytes: &[u8]) -> String {
    let mut result = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u64 = 0;
    let mut bits = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            result.push(BASE32_ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
        }
    }
    if bits > 0 {
        result.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
    }
    result
}

/// Decode into exactly `N` bytes; `None` on a foreign character or short input.
fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let val = *BASE32_DECODE.get(c as usize)?;
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            if pos < N {
                result[pos] = (buffer >> bits) as u8;
                pos += 1;
            }
        }
    }

    (pos == N).then_some(result)
}

/// Encode a 32-byte payload as a checksummed `grove_` address.
pub fn encode_address(payload: &[u8; 32]) -> Address {
    let checksum = blake2b_256(payload);
    let raw = format!(
        "{}{}{}",
        Address::PREFIX,
        encode_base32(payload),
        encode_base32(&checksum[..5])
    );
    // The alphabet is lowercase alphanumeric, so the structural check holds.
    Address::parse(raw).unwrap_or_else(|e| unreachable!("encoded address rejected: {e}"))
}

/// Extract the payload of a valid address, `None` if malformed or the
/// checksum does not match.
pub fn decode_address(address: &Address) -> Option<[u8; 32]> {
    let body = address.body();
    if body.len() != PAYLOAD_CHARS + CHECKSUM_CHARS {
        return None;
    }
    let (payload_part, checksum_part) = body.split_at(PAYLOAD_CHARS);
    let payload: [u8; 32] = decode_base32_fixed(payload_part)?;
    let checksum: [u8; 5] = decode_base32_fixed(checksum_part)?;
    (checksum == blake2b_256(&payload)[..5]).then_some(payload)
}

/// Validate that an address is well-formed and its checksum is correct.
pub fn validate_address(address: &Address) -> bool {
    decode_address(address).is_some()
}

/// Derive the address of a group account.
///
/// The mapping is injective in `(group_id, derivation_key)` up to Blake2b
/// collisions, so distinct keys never yield the same account.
pub fn derive_group_account_address(group_id: u64, derivation_key: u64) -> Address {
    let payload = blake2b_256_multi(&[
        GROUP_ACCOUNT_DOMAIN,
        &group_id.to_be_bytes(),
        &derivation_key.to_be_bytes(),
    ]);
    encode_address(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_and_validate() {
        let addr = encode_address(&[7u8; 32]);
        assert!(addr.as_str().starts_with("grove_"));
        assert_eq!(addr.as_str().len(), 6 + 60);
        assert!(validate_address(&addr));
        assert_eq!(decode_address(&addr), Some([7u8; 32]));
    }

    #[test]
    fn invalid_checksum_rejected() {
        let addr = encode_address(&[9u8; 32]);
        let mut raw = addr.as_str().to_string();
        let last = raw.pop().unwrap();
        raw.push(if last == '1' { '3' } else { '1' });
        assert!(!validate_address(&Address::parse(raw).unwrap()));
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(!validate_address(&Address::parse("grove_tooshort").unwrap()));
    }

    #[test]
    fn foreign_characters_rejected() {
        // '0' and 'l' are outside the alphabet.
        let raw = format!("grove_{}", "0".repeat(60));
        assert!(!validate_address(&Address::parse(raw).unwrap()));
    }

    #[test]
    fn group_account_derivation_is_deterministic_and_distinct() {
        let a = derive_group_account_address(1, 1);
        assert_eq!(a, derive_group_account_address(1, 1));
        assert_ne!(a, derive_group_account_address(1, 2));
        assert_ne!(a, derive_group_account_address(2, 1));
        assert!(validate_address(&a));
    }
}
