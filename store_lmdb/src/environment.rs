//! LMDB environment and the store built on it.

use std::path::{Path, PathBuf};

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use tracing::debug;

use grove_store::{BatchOp, KvStore, StoreError};

use crate::LmdbError;

const DB_NAME: &str = "grove";

/// A [`KvStore`] backed by one LMDB database.
pub struct LmdbStore {
    env: Env,
    db: Database<Bytes, Bytes>,
    path: PathBuf,
}

impl LmdbStore {
    /// Open or create an LMDB environment at `path` with the given map size.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per path by this process and
        // the file is not modified externally while open.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(1)
                .open(path)?
        };
        let mut wtxn = env.write_txn()?;
        let db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some(DB_NAME))?;
        wtxn.commit()?;
        debug!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env,
            db,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KvStore for LmdbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self.db.get(&rtxn, key).map_err(LmdbError::from)?;
        Ok(value.map(<[u8]>::to_vec))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.write_batch(vec![BatchOp::Put(key.to_vec(), value.to_vec())])
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError> {
        self.write_batch(vec![BatchOp::Delete(key.to_vec())])
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.db.prefix_iter(&rtxn, prefix).map_err(LmdbError::from)?;
        let mut entries = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(LmdbError::from)?;
            entries.push((key.to_vec(), value.to_vec()));
        }
        Ok(entries)
    }

    /// All writes land in one LMDB transaction; an error aborts it.
    fn write_batch(&mut self, batch: Vec<BatchOp>) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        for op in &batch {
            match op {
                BatchOp::Put(key, value) => {
                    self.db.put(&mut wtxn, key, value).map_err(LmdbError::from)?;
                }
                BatchOp::Delete(key) => {
                    self.db.delete(&mut wtxn, key).map_err(LmdbError::from)?;
                }
            }
        }
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
