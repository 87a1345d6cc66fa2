//! Storage layer for the persisted bookshelf.
//!
//! The collection is stored as one JSON blob in a key-value medium. The
//! medium is pluggable; the adapter knows the key, the layout, and the
//! availability probe.
//!
//! # Modules
//!
//! - `backend`: the [`KeyValueStore`] medium trait
//! - `file`: directory-backed medium with atomic writes
//! - `memory`: in-process medium with an optional quota
//! - `models`: persisted record types separate from domain models
//! - `adapter`: load/save of the whole collection

pub mod adapter;
pub mod backend;
pub mod file;
pub mod memory;
pub mod models;

pub use adapter::{SaveReport, StorageAdapter, CORRUPT_BACKUP_KEY, STORAGE_KEY};
pub use backend::KeyValueStore;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use models::{BookRecord, StoredShelf, FORMAT_VERSION};
