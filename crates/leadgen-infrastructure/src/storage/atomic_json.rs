//! Atomic JSON file operations.
//!
//! Writes go through a temporary file, fsync and rename; read-modify-write
//! cycles hold an exclusive lock file for their whole duration.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

use leadgen_core::LeadgenError;

/// Errors that can occur during atomic JSON operations.
#[derive(Debug, Error)]
pub enum AtomicJsonError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<AtomicJsonError> for LeadgenError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::Io(e) => e.into(),
            AtomicJsonError::Json(e) => e.into(),
            AtomicJsonError::Lock(message) => LeadgenError::data_access(message),
        }
    }
}

/// A handle to a JSON file that is replaced atomically on every save.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the file atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// A missing, empty or unparsable file starts from `default_value`; the
    /// unparsable content is overwritten by the save.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<(), AtomicJsonError>
    where
        F: FnOnce(&mut T),
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = match self.load() {
            Ok(Some(data)) => data,
            Ok(None) => default_value,
            Err(AtomicJsonError::Json(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding unreadable store file"
                );
                default_value
            }
            Err(e) => return Err(e),
        };

        f(&mut data);

        self.save(&data)
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicJsonError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

/// Exclusive lock guard, released when the handle is dropped.
///
/// The lock file itself stays on disk so every writer locks the same inode.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicJsonError::Lock(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    type Table = BTreeMap<String, u32>;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Table>::new(temp_dir.path().join("store.json"));

        let mut table = Table::new();
        table.insert("count".to_string(), 42);
        file.save(&table).unwrap();

        assert_eq!(file.load().unwrap(), Some(table));
        assert!(!temp_dir.path().join(".store.json.tmp").exists());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Table>::new(temp_dir.path().join("missing.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Table>::new(temp_dir.path().join("store.json"));

        file.update(Table::new(), |t| {
            *t.entry("count".to_string()).or_default() += 10;
        })
        .unwrap();
        file.update(Table::new(), |t| {
            *t.entry("count".to_string()).or_default() += 5;
        })
        .unwrap();

        assert_eq!(file.load().unwrap().unwrap()["count"], 15);
    }

    #[test]
    fn test_lock_file_is_kept_and_reacquirable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let lock_path = temp_dir.path().join("store.lock");

        let first = FileLock::acquire(&path).unwrap();
        drop(first);
        assert!(lock_path.exists());

        let file = AtomicJsonFile::<Table>::new(path.clone());
        file.update(Table::new(), |t| {
            t.insert("after".to_string(), 1);
        })
        .unwrap();
        assert!(lock_path.exists());

        let _again = FileLock::acquire(&path).unwrap();
        assert_eq!(file.load().unwrap().unwrap()["after"], 1);
    }

    #[test]
    fn test_update_replaces_corrupted_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();
        let file = AtomicJsonFile::<Table>::new(path);

        assert!(file.load().is_err());
        file.update(Table::new(), |t| {
            t.insert("fresh".to_string(), 1);
        })
        .unwrap();

        assert_eq!(file.load().unwrap().unwrap()["fresh"], 1);
    }
}
