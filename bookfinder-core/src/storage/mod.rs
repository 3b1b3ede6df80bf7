//! Durable key-value storage used to persist favorites

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// Returns `StorageError::NotFound` if nothing was written under `key`.
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Replace the value stored under `key`
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;
}

/// Local filesystem store, one file per key under a root directory
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Safely resolve a key to a path, preventing path traversal
    fn full_path(&self, key: &str) -> StorageResult<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in Path::new(key).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::InvalidKey(key.to_string()));
                }
            }
        }
        if normalized.as_os_str().is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(normalized))
    }
}

fn map_io(key: &str, e: std::io::Error) -> StorageError {
    if e.kind() == std::io::ErrorKind::NotFound {
        StorageError::NotFound(key.to_string())
    } else {
        StorageError::BackendError(e.to_string())
    }
}

#[async_trait]
impl KeyValueStore for LocalStorage {
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(key)?;
        tokio::fs::read(full_path).await.map_err(|e| map_io(key, e))
    }

    /// Writes to a temp file then renames to avoid partial writes
    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(key)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::BackendError(e.to_string()))?;
        }

        let mut temp_name = full_path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        tokio::fs::rename(&temp_path, &full_path)
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }
}

/// In-memory store (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Vec<u8>>> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn entries_mut(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<u8>>> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.entries()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn write(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        self.entries_mut().insert(key.to_string(), data);
        Ok(())
    }
}
