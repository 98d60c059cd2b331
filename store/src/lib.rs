//! Abstract storage for the grove governance engine.
//!
//! Every backend (LMDB, in-memory for testing) implements [`KvStore`], an
//! ordered byte map with prefix scans. The rest of the codebase depends only
//! on the trait. [`CacheStore`] layers a write buffer over any store so a
//! command can be committed or thrown away as one unit; buffers nest.

pub mod cache;
pub mod error;
pub mod kv;
pub mod memory;
pub mod sequence;
pub mod typed;

pub use cache::CacheStore;
pub use error::StoreError;
pub use kv::{BatchOp, KvStore};
pub use memory::MemoryStore;
pub use sequence::next_sequence;
pub use typed::TypedStore;
