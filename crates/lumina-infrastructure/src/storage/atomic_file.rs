//! Atomic JSON/TOML file operations.
//!
//! Writes go through a temporary sibling file that is fsynced and renamed
//! over the target, so readers never observe a half-written file.
//! Read-modify-write cycles hold an exclusive `fs2` lock on a sibling
//! `.lock` file.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use lumina_core::error::{LuminaError, Result};
use serde::{Serialize, de::DeserializeOwned};

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            FileFormat::Json => Ok(serde_json::from_str(content)?),
            FileFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    fn encode<T: Serialize>(self, data: &T) -> Result<String> {
        match self {
            FileFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            FileFormat::Toml => Ok(toml::to_string_pretty(data)?),
        }
    }
}

/// A handle to a serialized file with atomic replace semantics.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn json(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Json)
    }

    pub fn toml(path: PathBuf) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// - `Ok(None)`: file doesn't exist or is blank
    /// - `Err`: failed to read or decode
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        self.format.decode(&content).map(Some)
    }

    /// Encodes `data` and atomically replaces the file.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = self.format.encode(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under an exclusive lock.
    ///
    /// `load_current` decides what the closure starts from, which lets a
    /// caller recover from a file it cannot decode.
    pub fn update_with<L, F>(&self, load_current: L, f: F) -> Result<()>
    where
        L: FnOnce(Result<Option<T>>) -> Result<T>,
        F: FnOnce(&mut T) -> Result<()>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = load_current(self.load())?;
        f(&mut data)?;
        self.save(&data)
    }

    /// Read-modify-write, starting from `default_value` if the file is absent.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<()>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        self.update_with(|current| Ok(current?.unwrap_or(default_value)), f)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| LuminaError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| LuminaError::io("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock guard; the lock file is removed on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        use fs2::FileExt;
        file.lock_exclusive()
            .map_err(|e| LuminaError::io(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock happens when the handle closes; removal is best effort
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Settings {
        name: String,
        count: u32,
    }

    #[test]
    fn test_toml_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<Settings>::toml(temp_dir.path().join("settings.toml"));

        let settings = Settings {
            name: "lumina".to_string(),
            count: 3,
        };
        file.save(&settings).unwrap();
        assert_eq!(file.load().unwrap(), Some(settings));
    }

    #[test]
    fn test_load_missing_or_blank_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let file = AtomicFile::<BTreeMap<String, String>>::json(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_malformed_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{oops").unwrap();
        let file = AtomicFile::<BTreeMap<String, String>>::json(path);
        assert!(file.load().unwrap_err().is_serialization());
    }

    #[test]
    fn test_update_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::<BTreeMap<String, String>>::json(temp_dir.path().join("store.json"));

        file.update(BTreeMap::new(), |map| {
            map.insert("a".to_string(), "1".to_string());
            Ok(())
        })
        .unwrap();
        file.update(BTreeMap::new(), |map| {
            map.insert("b".to_string(), "2".to_string());
            Ok(())
        })
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["a"], "1");
    }

    #[test]
    fn test_no_temp_or_lock_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let file = AtomicFile::<BTreeMap<String, String>>::json(path.clone());
        file.update(BTreeMap::new(), |_| Ok(())).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".store.json.tmp").exists());
        assert!(!temp_dir.path().join("store.lock").exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("store.json");
        let file = AtomicFile::<BTreeMap<String, String>>::json(path.clone());
        file.save(&BTreeMap::new()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap().trim(), "{}");
    }
}
