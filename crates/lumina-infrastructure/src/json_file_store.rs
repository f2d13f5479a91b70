//! File-backed key-value store.
//!
//! All keys live in one JSON object, e.g. `{"lumina_wishlist": "[\"5\"]"}`.
//! Values are opaque strings, as with browser local storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lumina_core::error::Result;
use lumina_core::wishlist::KeyValueStore;

use crate::storage::AtomicFile;

type Entries = BTreeMap<String, String>;

/// A [`KeyValueStore`] persisted as a single JSON object file.
///
/// Every write re-reads the file under an exclusive lock and replaces it
/// atomically. A file that cannot be decoded reads as an error, and the
/// next write starts over from an empty object.
pub struct JsonFileKeyValueStore {
    file: AtomicFile<Entries>,
}

impl JsonFileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicFile::json(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let path = self.file.path().display().to_string();
        self.file.update_with(
            |current| match current {
                Ok(entries) => Ok(entries.unwrap_or_default()),
                Err(e) if e.is_serialization() => {
                    tracing::warn!("Replacing unreadable storage file {}: {}", path, e);
                    Ok(Entries::new())
                }
                Err(e) => Err(e),
            },
            |entries| {
                f(entries);
                Ok(())
            },
        )
    }
}

impl KeyValueStore for JsonFileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.file.load()?.unwrap_or_default();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })?;
        tracing::debug!("Stored '{}' in {}", key, self.path().display());
        Ok(())
    }
}
