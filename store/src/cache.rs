//! Buffered unit of work over another store.
//!
//! Reads see the buffer first and fall through to the parent. Writes stay
//! in the buffer until [`CacheStore::commit`] hands them to the parent as a
//! single batch. Dropping the cache discards them. A cache is itself a
//! [`KvStore`], so caches nest: a child commits into its parent's buffer.

use crate::{BatchOp, KvStore, StoreError};
use std::collections::BTreeMap;

pub struct CacheStore<'a, S: KvStore + ?Sized> {
    parent: &'a mut S,
    /// `None` marks a pending delete.
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a, S: KvStore + ?Sized> CacheStore<'a, S> {
    pub fn new(parent: &'a mut S) -> Self {
        Self {
            parent,
            pending: BTreeMap::new(),
        }
    }

    /// Number of buffered writes.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Flush every buffered write into the parent as one batch.
    pub fn commit(self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let batch = self
            .pending
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOp::Put(key, value),
                None => BatchOp::Delete(key),
            })
            .collect();
        self.parent.write_batch(batch)
    }
}

impl<S: KvStore + ?Sized> KvStore for CacheStore<'_, S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        match self.pending.get(key) {
            Some(buffered) => Ok(buffered.clone()),
            None => self.parent.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        self.pending.insert(key.to_vec(), None);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.parent.scan_prefix(prefix)?.into_iter().collect();
        let buffered = self
            .pending
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix));
        for (key, value) in buffered {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(merged.into_iter().collect())
    }

    fn write_batch(&mut self, batch: Vec<BatchOp>) -> Result<(), StoreError> {
        for op in batch {
            match op {
                BatchOp::Put(key, value) => self.pending.insert(key, Some(value)),
                BatchOp::Delete(key) => self.pending.insert(key, None),
            };
        }
        Ok(())
    }
}
