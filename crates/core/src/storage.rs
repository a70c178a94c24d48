//! Durable key-value storage for the session token pair and user record

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Key holding the bearer access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Key holding the opaque refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Key holding the JSON-serialized [`crate::User`]
pub const USER_KEY: &str = "user";

/// Every key that makes up a persisted session
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Key-value store that survives restarts.
///
/// Mirrors the browser `Storage` interface so the same session code runs on
/// top of `localStorage` or a file on disk.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Remove the token pair and user record.
    ///
    /// Attempts every key even when one removal fails and reports the first error.
    fn clear_session(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(err) = self.remove_item(key) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// In-process storage, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{SessionStorage, StorageError};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, PoisonError};

    /// Storage backed by a single JSON object on disk
    #[derive(Debug)]
    pub struct FileStorage {
        path: PathBuf,
        // Serializes read-modify-write cycles within this process
        lock: Mutex<()>,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                lock: Mutex::new(()),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(content) => Ok(serde_json::from_str(&content)?),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(err) => Err(err.into()),
            }
        }

        /// Load for a write. A corrupted file is replaced rather than blocking
        /// every write; IO errors propagate so other keys are never dropped.
        fn load_or_reset(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
            match self.load() {
                Ok(items) => Ok((items, false)),
                Err(StorageError::Corrupted(_)) => Ok((BTreeMap::new(), true)),
                Err(err) => Err(err),
            }
        }

        fn save(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(items)?;
            std::fs::write(&self.path, content)?;
            Ok(())
        }
    }

    impl SessionStorage for FileStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(self.load()?.remove(key))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
            let (mut items, _) = self.load_or_reset()?;
            items.insert(key.to_string(), value.to_string());
            self.save(&items)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
            let (mut items, corrupted) = self.load_or_reset()?;
            if items.remove(key).is_some() || corrupted {
                return self.save(&items);
            }
            Ok(())
        }
    }
}
