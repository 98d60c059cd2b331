//! The ordered key-value store trait.

use crate::StoreError;

/// A single write inside a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOp {
    Put(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

/// Ordered byte-keyed map.
///
/// Keys compare lexicographically; [`KvStore::scan_prefix`] returns entries
/// in ascending key order.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Remove a key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError>;

    /// All entries whose key starts with `prefix`, ascending.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;

    fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Apply a batch of writes. Backends with real transactions override
    /// this to make the batch atomic.
    fn write_batch(&mut self, batch: Vec<BatchOp>) -> Result<(), StoreError> {
        for op in batch {
            match op {
                BatchOp::Put(key, value) => self.put(&key, &value)?,
                BatchOp::Delete(key) => self.delete(&key)?,
            }
        }
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        (**self).scan_prefix(prefix)
    }

    fn write_batch(&mut self, batch: Vec<BatchOp>) -> Result<(), StoreError> {
        (**self).write_batch(batch)
    }
}
