//! Key-value persistence providers.
//!
//! The store reads and writes one serialized blob under a well-known key;
//! providers supply that blob from wherever it actually lives. The trait is
//! the seam that lets tests run against memory and the binary against disk.

use std::collections::HashMap;
use std::path::PathBuf;

/// Errors raised by a storage provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Reading the stored blob failed.
    #[error("storage read failed: {message}")]
    Read { message: String },

    /// Writing the blob failed.
    #[error("storage write failed: {message}")]
    Write { message: String },
}

/// A key-value persistence provider.
///
/// `get` returns `None` when the key has never been written; that is not an
/// error. `set` replaces the previous value wholesale.
pub trait StorageProvider {
    /// Read the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, ProviderError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), ProviderError>;
}

/// In-memory provider, for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    entries: HashMap<String, String>,
}

impl MemoryProvider {
    /// Create an empty in-memory provider.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for MemoryProvider {
    fn get(&self, key: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ProviderError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Disk-backed provider storing each key as `<dir>/<key>.json`.
///
/// The directory is created on first write if it does not exist.
#[derive(Debug, Clone)]
pub struct FileProvider {
    dir: PathBuf,
}

impl FileProvider {
    /// Create a provider rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageProvider for FileProvider {
    fn get(&self, key: &str) -> Result<Option<String>, ProviderError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ProviderError::Read {
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ProviderError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| ProviderError::Write {
                message: format!("failed to create storage directory: {e}"),
            })?;
        }

        std::fs::write(self.path_for(key), value).map_err(|e| ProviderError::Write {
            message: e.to_string(),
        })
    }
}
