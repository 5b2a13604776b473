//! Key-value storage abstraction for persisted snapshots.
//!
//! The persistence layer only needs an asynchronous string store with
//! whole-value put-by-key semantics. [`FileStore`] backs each key with a
//! file in a data directory; [`MemoryStore`] keeps them in a map for tests
//! and embedders.

mod file;
mod memory;

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur reading or writing a key.
#[derive(Debug, Error)]
pub enum KvError {
    /// I/O error on the file backing a key.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An asynchronous string-keyed store.
///
/// `get` distinguishes an absent key (`Ok(None)`) from a read failure.
/// `set` replaces the whole value for the key, so the last completed write
/// for a key fully determines its contents.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), KvError>;
}
