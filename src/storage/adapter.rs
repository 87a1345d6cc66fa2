//! Storage adapter between the book collection and a key-value medium.
//!
//! The adapter owns the medium, probes whether it is usable, and moves the
//! whole collection in and out of a single JSON blob stored under
//! [`STORAGE_KEY`]. There is no incremental diffing: every save rewrites the
//! blob in full.

use crate::domain::error::{BookshelfError, Result};
use crate::domain::Book;
use crate::storage::backend::KeyValueStore;
use crate::storage::models::{PersistedShelf, StoredShelf, FORMAT_VERSION};

/// Key holding the serialized bookshelf.
pub const STORAGE_KEY: &str = "BOOKSHELF_APPS";

/// Key used for the throwaway availability probe.
const PROBE_KEY: &str = "__test__";

/// Key receiving an unparseable blob so it survives the next save.
pub const CORRUPT_BACKUP_KEY: &str = "BOOKSHELF_APPS.corrupt";

/// Result of a successful save, surfaced to the user as a "saved" notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    /// Number of books written.
    pub books: usize,
    /// Size of the written blob.
    pub bytes: usize,
}

/// Persists the book collection through a [`KeyValueStore`].
///
/// # Examples
///
/// ```
/// use bookshelf::domain::{BookRepository, NewBook};
/// use bookshelf::storage::{MemoryStore, StorageAdapter};
///
/// let mut storage = StorageAdapter::new(Box::new(MemoryStore::new()));
/// let mut shelf = BookRepository::new();
/// shelf.add(NewBook::new("Dune", "Frank Herbert", 1965, false)?)?;
///
/// storage.save(shelf.books())?;
/// assert_eq!(storage.load()?, shelf.books());
/// # Ok::<(), bookshelf::BookshelfError>(())
/// ```
pub struct StorageAdapter {
    medium: Box<dyn KeyValueStore>,
}

impl StorageAdapter {
    #[must_use]
    pub fn new(medium: Box<dyn KeyValueStore>) -> Self {
        Self { medium }
    }

    /// Probes the medium with a throwaway write and delete.
    ///
    /// Returns `false` and logs a warning when the medium is disabled or full.
    #[must_use]
    pub fn is_available(&mut self) -> bool {
        match self.probe() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "storage medium unavailable");
                false
            }
        }
    }

    fn probe(&mut self) -> Result<()> {
        self.medium.set(PROBE_KEY, PROBE_KEY.as_bytes())?;
        self.medium.remove(PROBE_KEY)
    }

    /// Writes the whole collection, replacing any previously stored blob.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::StorageUnavailable`] if the probe or the
    /// write fails.
    pub fn save(&mut self, books: &[Book]) -> Result<SaveReport> {
        let _span = tracing::debug_span!("storage_save", count = books.len()).entered();

        self.probe()
            .map_err(|e| BookshelfError::StorageUnavailable(e.to_string()))?;

        let blob = serde_json::to_vec(&StoredShelf::from_books(books))
            .map_err(|e| BookshelfError::Storage(format!("failed to serialize JSON: {e}")))?;

        self.medium
            .set(STORAGE_KEY, &blob)
            .map_err(|e| BookshelfError::StorageUnavailable(e.to_string()))?;

        let report = SaveReport {
            books: books.len(),
            bytes: blob.len(),
        };
        tracing::info!(books = report.books, bytes = report.bytes, "bookshelf saved");
        Ok(report)
    }

    /// Reads the stored collection.
    ///
    /// A missing blob or a JSON `null` yields an empty collection. Both the
    /// versioned envelope and the legacy bare array are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Parse`] if the blob is not a bookshelf or
    /// was written by a newer format version, and a storage error if the
    /// medium cannot be read.
    pub fn load(&self) -> Result<Vec<Book>> {
        let _span = tracing::debug_span!("storage_load").entered();

        let Some(blob) = self.medium.get(STORAGE_KEY)? else {
            tracing::debug!("no stored bookshelf, starting empty");
            return Ok(Vec::new());
        };

        let parsed: Option<PersistedShelf> = serde_json::from_slice(&blob)
            .map_err(|e| BookshelfError::Parse(format!("failed to parse JSON: {e}")))?;

        let records = match parsed {
            None => {
                tracing::debug!("stored bookshelf is null, starting empty");
                Vec::new()
            }
            Some(PersistedShelf::Legacy(records)) => {
                tracing::info!(count = records.len(), "loaded legacy unversioned bookshelf");
                records
            }
            Some(PersistedShelf::Versioned(shelf)) if shelf.version > FORMAT_VERSION => {
                return Err(BookshelfError::Parse(format!(
                    "unsupported format version {} (newest known is {FORMAT_VERSION})",
                    shelf.version
                )));
            }
            Some(PersistedShelf::Versioned(shelf)) => shelf.books,
        };

        tracing::debug!(count = records.len(), "loaded bookshelf");
        Ok(records.into_iter().map(Book::from).collect())
    }

    /// Copies the raw stored blob to [`CORRUPT_BACKUP_KEY`].
    ///
    /// Called after a failed load so that the next save does not silently
    /// destroy data the user may want to recover by hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read or written.
    pub fn preserve_corrupt(&mut self) -> Result<()> {
        if let Some(blob) = self.medium.get(STORAGE_KEY)? {
            self.medium.set(CORRUPT_BACKUP_KEY, &blob)?;
            tracing::warn!(bytes = blob.len(), key = CORRUPT_BACKUP_KEY, "preserved corrupt bookshelf");
        }
        Ok(())
    }
}

impl std::fmt::Debug for StorageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAdapter").finish_non_exhaustive()
    }
}
