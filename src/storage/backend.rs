//! Persistence medium abstraction.
//!
//! This module defines the [`KeyValueStore`] trait: a byte store with
//! get/set/remove, the same shape as a browser's local storage. The storage
//! adapter is written against this trait so the medium can be swapped without
//! touching the collection logic.
//!
//! # Design Philosophy
//!
//! The trait is deliberately the smallest surface the adapter needs. Values
//! are opaque bytes; serialization lives in the adapter.

use crate::domain::error::Result;

/// Key-value byte store used to persist the bookshelf.
///
/// # Implementations
///
/// - [`FileStore`](crate::storage::FileStore): one file per key in a directory
/// - [`MemoryStore`](crate::storage::MemoryStore): in-process map with an optional quota
///
/// # Examples
///
/// ```
/// use bookshelf::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("greeting", b"hello")?;
/// assert_eq!(store.get("greeting")?, Some(b"hello".to_vec()));
/// store.remove("greeting")?;
/// assert_eq!(store.get("greeting")?, None);
/// # Ok::<(), bookshelf::BookshelfError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the write (disabled, full,
    /// invalid key).
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Deletes the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the delete.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
