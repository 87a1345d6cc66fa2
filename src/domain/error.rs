//! Error types for the bookshelf.
//!
//! This module defines the centralized error type [`BookshelfError`] and a type
//! alias [`Result`] used throughout the crate. Every variant is recoverable: the
//! interaction controller turns errors into a single user-visible notice and
//! the session carries on.

use thiserror::Error;

/// The main error type for bookshelf operations.
///
/// The first five variants form the user-facing taxonomy (validation,
/// duplicate title, empty keyword, unavailable storage, corrupt data). The
/// remaining variants wrap lower-level failures from the storage medium and
/// theme loading.
///
/// # Examples
///
/// ```
/// use bookshelf::BookshelfError;
///
/// let err = BookshelfError::DuplicateTitle("Dune".to_string());
/// assert_eq!(err.to_string(), "A book titled \"Dune\" is already on the shelf");
/// ```
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// A required input is missing, blank, or malformed.
    ///
    /// The string names the offending field in user-facing terms.
    #[error("{0}")]
    Validation(String),

    /// A book with a case-insensitively equal title already exists.
    #[error("A book titled \"{0}\" is already on the shelf")]
    DuplicateTitle(String),

    /// A title search was requested with an empty or blank keyword.
    #[error("Enter a keyword to search for")]
    EmptyKeyword,

    /// The persistence medium refused a probe write (disabled or full).
    #[error("Storage is unavailable: {0}")]
    StorageUnavailable(String),

    /// The persisted blob exists but cannot be decoded.
    #[error("Saved bookshelf data is corrupt: {0}")]
    Parse(String),

    /// A storage medium operation failed for a reason other than availability.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl BookshelfError {
    /// Short machine-friendly name of the variant, used as a tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::DuplicateTitle(_) => "duplicate_title",
            Self::EmptyKeyword => "empty_keyword",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::Parse(_) => "parse",
            Self::Storage(_) => "storage",
            Self::Io(_) => "io",
            Self::Theme(_) => "theme",
        }
    }
}

/// A specialized `Result` type for bookshelf operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;
