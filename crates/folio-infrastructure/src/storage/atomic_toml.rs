//! Atomic TOML file operations.
//!
//! Writes go to a temporary sibling file which is fsynced and renamed over
//! the target, under an exclusive lock file, so readers never see a torn file.

use folio_core::{FolioError, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to a TOML file holding one value of type `T`.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
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
    /// Returns `Ok(None)` if the file doesn't exist or is empty.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Serializes `data` and replaces the file atomically.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = create_private(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Read-modify-write under an exclusive lock.
    ///
    /// `default_value` is used when the file doesn't exist yet. Returns the
    /// value as written.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data);
        self.save(&data)?;

        Ok(data)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| FolioError::storage("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| FolioError::storage("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

fn create_private(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    Ok(options.open(path)?)
}

/// Exclusive lock guard, released on drop. The lock file itself must stay
/// on disk so every contender locks the same inode.
struct FileLock {
    #[allow(dead_code)]
    file: File,
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

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| FolioError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            use fs2::FileExt;
            let _ = self.file.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Remembered {
        url: String,
        visits: u32,
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Remembered>::new(temp_dir.path().join("missing.toml"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_creates_then_modifies() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("state.toml");
        let file = AtomicTomlFile::<Remembered>::new(path.clone());
        let default = Remembered {
            url: "http://a".into(),
            visits: 0,
        };

        file.update(default.clone(), |r| r.visits += 1).unwrap();
        let written = file.update(default, |r| r.visits += 1).unwrap();

        assert_eq!(written.visits, 2);
        assert_eq!(file.load().unwrap().unwrap().visits, 2);
        assert!(!temp_dir.path().join("nested").join(".state.toml.tmp").exists());
        assert!(path.with_extension("lock").exists());
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        let default = Remembered {
            url: "http://a".into(),
            visits: 0,
        };

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let path = path.clone();
                let default = default.clone();
                std::thread::spawn(move || {
                    let file = AtomicTomlFile::<Remembered>::new(path);
                    for _ in 0..25 {
                        file.update(default.clone(), |r| r.visits += 1).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let file = AtomicTomlFile::<Remembered>::new(path);
        assert_eq!(file.load().unwrap().unwrap().visits, 100);
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "url = [").unwrap();
        let file = AtomicTomlFile::<Remembered>::new(path);
        let err = file.load().unwrap_err();
        assert_eq!(err.kind(), folio_core::ErrorKind::Serialization);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.toml");
        let file = AtomicTomlFile::<Remembered>::new(path.clone());
        file.save(&Remembered {
            url: "u".into(),
            visits: 1,
        })
        .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
