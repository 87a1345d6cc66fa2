//! Directory-backed key-value store.
//!
//! Each key is a file named `<key>.json` inside the store directory. Writes go
//! to a temporary sibling first and are renamed into place, so a crash never
//! leaves a half-written value behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: one file read per `get`
//! - **Write**: whole value rewritten per `set`
//! - **Best for**: a handful of keys holding small JSON documents

use crate::domain::error::{BookshelfError, Result};
use crate::storage::backend::KeyValueStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File extension used for stored values.
const VALUE_EXTENSION: &str = "json";

/// Key-value store persisting each key as a file.
///
/// # Examples
///
/// ```no_run
/// use bookshelf::storage::{FileStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut store = FileStore::new(PathBuf::from("/tmp/bookshelf"));
/// store.set("BOOKSHELF_APPS", b"[]")?;
/// # Ok::<(), bookshelf::BookshelfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    ///
    /// Nothing touches the filesystem until the first write, which creates the
    /// directory. An unusable directory therefore shows up in the adapter's
    /// availability probe rather than here.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a key to its file path, rejecting keys that could escape the directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(BookshelfError::Storage(format!("invalid storage key: {key:?}")));
        }

        Ok(self.dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;

        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::trace!(key = %key, bytes = bytes.len(), "value read");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("tmp");

        std::fs::create_dir_all(&self.dir)?;

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!(key = %key, bytes = value.len(), "value written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_get_remove_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("shelf"));

        assert_eq!(store.get("BOOKSHELF_APPS").unwrap(), None);

        store.set("BOOKSHELF_APPS", b"[1,2]").unwrap();
        assert_eq!(store.get("BOOKSHELF_APPS").unwrap(), Some(b"[1,2]".to_vec()));
        assert!(dir.path().join("shelf/BOOKSHELF_APPS.json").is_file());

        store.set("BOOKSHELF_APPS", b"[]").unwrap();
        assert_eq!(store.get("BOOKSHELF_APPS").unwrap(), Some(b"[]".to_vec()));

        store.remove("BOOKSHELF_APPS").unwrap();
        store.remove("BOOKSHELF_APPS").unwrap();
        assert_eq!(store.get("BOOKSHELF_APPS").unwrap(), None);
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        for key in ["../outside", "a/b", "", ".hidden"] {
            assert!(matches!(store.set(key, b"x"), Err(BookshelfError::Storage(_))), "{key}");
        }
    }

    #[test]
    fn directory_is_created_on_first_write() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        let mut store = FileStore::new(nested.clone());

        assert!(!nested.exists());
        assert_eq!(store.get("BOOKSHELF_APPS").unwrap(), None);
        store.set("BOOKSHELF_APPS", b"null").unwrap();
        assert!(nested.join("BOOKSHELF_APPS.json").is_file());
    }

    #[test]
    fn unwritable_location_fails_writes() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let mut store = FileStore::new(blocker.join("shelf"));
        assert!(store.set("__test__", b"__test__").is_err());
    }

    #[test]
    fn no_temporary_file_left_after_write() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        store.set("__test__", b"__test__").unwrap();
        assert!(!dir.path().join("__test__.tmp").exists());
    }
}
