//! Book domain model.
//!
//! This module defines [`Book`], the single entity of the bookshelf, together
//! with its identifier [`BookId`] and the validated add request [`NewBook`].
//! A `Book` can only be created by the repository from a `NewBook`, which is
//! how the non-empty title and author invariant is kept.

use super::error::{BookshelfError, Result};
use std::fmt;

/// Identity key of a book.
///
/// Assigned once by the repository and never changed. Values are millisecond
/// timestamps bumped to stay strictly increasing, see
/// [`IdGenerator`](super::id::IdGenerator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub i64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry on the bookshelf.
///
/// Only `is_complete` is mutated after creation, through
/// [`BookRepository::toggle_completion`](super::BookRepository::toggle_completion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub is_complete: bool,
}

impl Book {
    /// Case-folded title used for duplicate detection and search.
    #[must_use]
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }
}

/// A validated request to add a book.
///
/// Title and author are trimmed and guaranteed non-empty.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::NewBook;
///
/// let book = NewBook::new("  Dune ", "Frank Herbert", 1965, false)?;
/// assert_eq!(book.title(), "Dune");
///
/// assert!(NewBook::new("   ", "Frank Herbert", 1965, false).is_err());
/// # Ok::<(), bookshelf::BookshelfError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    title: String,
    author: String,
    year: i32,
    is_complete: bool,
}

impl NewBook {
    /// Builds an add request, rejecting blank titles and authors.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Validation`] naming the first blank field.
    pub fn new(
        title: impl AsRef<str>,
        author: impl AsRef<str>,
        year: i32,
        is_complete: bool,
    ) -> Result<Self> {
        let title = title.as_ref().trim();
        let author = author.as_ref().trim();

        if title.is_empty() {
            return Err(BookshelfError::Validation("Title is required".to_string()));
        }
        if author.is_empty() {
            return Err(BookshelfError::Validation("Author is required".to_string()));
        }

        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            year,
            is_complete,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Turns the request into a stored book under the given id.
    pub(crate) fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
            is_complete: self.is_complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_trims_inputs() {
        let book = NewBook::new(" Dune  ", "  Herbert", 1965, true).unwrap();
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Herbert");
        assert_eq!(book.year(), 1965);
        assert!(book.is_complete());
    }

    #[test]
    fn new_book_rejects_blank_author() {
        let err = NewBook::new("Dune", "  \t", 1965, false).unwrap_err();
        assert!(matches!(err, BookshelfError::Validation(ref m) if m == "Author is required"));
    }

    #[test]
    fn into_book_keeps_fields() {
        let book = NewBook::new("Dune", "Herbert", 1965, false)
            .unwrap()
            .into_book(BookId(42));
        assert_eq!(book.id, BookId(42));
        assert_eq!(book.title_key(), "dune");
        assert!(!book.is_complete);
    }
}
