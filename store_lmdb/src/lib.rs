//! LMDB storage backend for grove.
//!
//! Implements [`grove_store::KvStore`] with the `heed` LMDB bindings. All
//! engine state lives in one named database; a committed unit of work is
//! written in a single LMDB write transaction.

pub mod environment;
pub mod error;

pub use environment::LmdbStore;
pub use error::LmdbError;
