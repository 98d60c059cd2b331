//! Monotonic counters stored as 8-byte big-endian values.

use crate::{KvStore, StoreError};

/// Increment the counter at `key` and return the new value. The first call
/// on a fresh store returns 1.
pub fn next_sequence<S: KvStore + ?Sized>(store: &mut S, key: &[u8]) -> Result<u64, StoreError> {
    let current = match store.get(key)? {
        Some(bytes) => {
            let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                StoreError::Corruption(format!("sequence value has {} bytes", bytes.len()))
            })?;
            u64::from_be_bytes(raw)
        }
        None => 0,
    };
    let next = current
        .checked_add(1)
        .ok_or_else(|| StoreError::Corruption("sequence exhausted".into()))?;
    store.put(key, &next.to_be_bytes())?;
    Ok(next)
}
