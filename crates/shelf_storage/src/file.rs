//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Suffix of the sibling file a replace writes before renaming into place.
const TEMP_SUFFIX: &str = ".tmp";

/// A file-based storage backend.
///
/// Each slot is one file directly inside the root directory, named after
/// the slot. Data survives process restarts.
///
/// # Durability
///
/// `replace` uses the write-then-rename pattern:
/// 1. Write the payload to `.<name>.tmp` in the root directory
/// 2. Sync the temporary file (when `sync_on_write` is enabled)
/// 3. Rename it over the slot file
/// 4. Fsync the root directory so the rename itself is durable
///
/// A crash at any point leaves either the old file or the new one.
///
/// # Example
///
/// ```no_run
/// use shelf_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open_with_create_dirs(Path::new("data")).unwrap();
/// backend.replace("settings.json", b"{}").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
    sync_on_write: bool,
}

impl FileBackend {
    /// Opens a file backend rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotADirectory`] if `root` is missing or is
    /// not a directory.
    pub fn open(root: &Path) -> StorageResult<Self> {
        if !root.is_dir() {
            return Err(StorageError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            sync_on_write: true,
        })
    }

    /// Opens a file backend, creating the root directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, or if the path
    /// exists and is not a directory.
    pub fn open_with_create_dirs(root: &Path) -> StorageResult<Self> {
        if root.exists() && !root.is_dir() {
            return Err(StorageError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        fs::create_dir_all(root)?;
        Self::open(root)
    }

    /// Sets whether each replace syncs the temporary file before renaming.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn temp_path(&self, name: &str) -> PathBuf {
        self.root.join(format!(".{name}{TEMP_SUFFIX}"))
    }

    fn write_temp(&self, temp_path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = File::create(temp_path)?;
        file.write_all(data)?;
        if self.sync_on_write {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Syncs the root directory so renames and deletions are durable.
    ///
    /// Windows NTFS journals metadata updates, so the explicit directory
    /// fsync only happens on unix.
    #[cfg(unix)]
    fn sync_root(&self) -> StorageResult<()> {
        if self.sync_on_write {
            File::open(&self.root)?.sync_all()?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_root(&self) -> StorageResult<()> {
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        match fs::read(self.slot_path(name)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::not_found(name)),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn replace(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        let temp_path = self.temp_path(name);

        if let Err(e) = self.write_temp(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::Io(e));
        }

        if let Err(e) = fs::rename(&temp_path, self.slot_path(name)) {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::Io(e));
        }

        self.sync_root()?;
        trace!(slot = name, bytes = data.len(), "replaced slot");
        Ok(())
    }

    fn remove(&self, name: &str) -> StorageResult<bool> {
        match fs::remove_file(self.slot_path(name)) {
            Ok(()) => {
                self.sync_root()?;
                trace!(slot = name, "removed slot");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        match fs::metadata(self.slot_path(name)) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        Some(self.slot_path(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_open_existing_dir() {
        let dir = tempdir().unwrap();

        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.root(), dir.path());
    }

    #[test]
    fn file_open_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        let result = FileBackend::open(&missing);
        assert!(matches!(result, Err(StorageError::NotADirectory { .. })));
    }

    #[test]
    fn file_open_on_regular_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, b"x").unwrap();

        assert!(matches!(
            FileBackend::open(&path),
            Err(StorageError::NotADirectory { .. })
        ));
        assert!(matches!(
            FileBackend::open_with_create_dirs(&path),
            Err(StorageError::NotADirectory { .. })
        ));
    }

    #[test]
    fn file_exists_ignores_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub.json")).unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert!(!backend.exists("sub.json").unwrap());
        assert!(!backend.exists("missing.json").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn file_exists_surfaces_metadata_errors() {
        // A path component that is a regular file makes stat fail with
        // ENOTDIR rather than ENOENT.
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("plain"), b"x").unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert!(matches!(
            backend.exists("plain/inner.json"),
            Err(StorageError::Io(_))
        ));
    }

    #[test]
    fn file_create_with_dirs() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("store");

        let backend = FileBackend::open_with_create_dirs(&root).unwrap();
        assert!(root.is_dir());
        assert!(!backend.exists("a.json").unwrap());
    }

    #[test]
    fn file_replace_and_read() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.replace("a.json", b"hello").unwrap();
        assert_eq!(backend.read("a.json").unwrap(), b"hello");
        assert_eq!(fs::read(dir.path().join("a.json")).unwrap(), b"hello");
    }

    #[test]
    fn file_replace_overwrites_whole_file() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.replace("a.json", b"a much longer payload").unwrap();
        backend.replace("a.json", b"short").unwrap();

        assert_eq!(backend.read("a.json").unwrap(), b"short");
    }

    #[test]
    fn file_replace_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.replace("a.json", b"data").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["a.json".to_string()]);
    }

    #[test]
    fn file_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        let result = backend.read("missing.json");
        assert!(matches!(result, Err(StorageError::NotFound { ref name }) if name == "missing.json"));
    }

    #[test]
    fn file_remove() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.replace("a.json", b"data").unwrap();
        assert!(backend.exists("a.json").unwrap());

        assert!(backend.remove("a.json").unwrap());
        assert!(!backend.exists("a.json").unwrap());
    }

    #[test]
    fn file_remove_missing_is_ok() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert!(!backend.remove("missing.json").unwrap());
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();

        {
            let backend = FileBackend::open(dir.path()).unwrap();
            backend.replace("a.json", b"persistent data").unwrap();
        }

        {
            let backend = FileBackend::open(dir.path()).unwrap();
            assert_eq!(backend.read("a.json").unwrap(), b"persistent data");
        }
    }

    #[test]
    fn file_without_sync() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap().sync_on_write(false);

        backend.replace("a.json", b"fast").unwrap();
        assert_eq!(backend.read("a.json").unwrap(), b"fast");
    }

    #[test]
    fn file_locate() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert_eq!(backend.locate("a.json"), Some(dir.path().join("a.json")));
    }
}
