//! Bincode-encoded values on top of the raw byte store.

use crate::{KvStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Typed access for any [`KvStore`].
pub trait TypedStore: KvStore {
    fn get_value<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, StoreError> {
        self.get(key)?.map(|bytes| decode(&bytes)).transpose()
    }

    fn put_value<T: Serialize>(&mut self, key: &[u8], value: &T) -> Result<(), StoreError> {
        let bytes = encode(value)?;
        self.put(key, &bytes)
    }

    /// Decode every value under `prefix`, in key order.
    fn scan_values<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<T>, StoreError> {
        self.scan_prefix(prefix)?
            .iter()
            .map(|(_, bytes)| decode(bytes))
            .collect()
    }
}

impl<S: KvStore + ?Sized> TypedStore for S {}
