//! File-backed key-value store.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{KeyValueStore, KvError};

/// Stores each key as a file in a data directory.
///
/// Keys must be valid file names. Writes replace the whole file, and the
/// data directory is created on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the file path backing a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(key)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path(key);
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::Io { path, source: e }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| KvError::Io {
                path: self.data_dir.clone(),
                source: e,
            })?;

        let path = self.path(key);
        fs::write(&path, value)
            .await
            .map_err(|e| KvError::Io { path, source: e })
    }
}
