//! In-memory book collection.
//!
//! [`BookRepository`] owns the ordered list of books for the session. It is a
//! plain value injected into the controller, never a process-wide global.
//! Insertion order is the display order; removal keeps the relative order of
//! the remaining books.

use super::book::{Book, BookId, NewBook};
use super::error::{BookshelfError, Result};
use super::id::IdGenerator;
use std::collections::HashSet;

/// Owner of the book collection.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::{BookRepository, NewBook};
///
/// let mut shelf = BookRepository::new();
/// let dune = shelf.add(NewBook::new("Dune", "Frank Herbert", 1965, false)?)?;
///
/// assert_eq!(shelf.len(), 1);
/// assert!(shelf.toggle_completion(dune.id));
/// assert!(shelf.find_by_id(dune.id).is_some_and(|b| b.is_complete));
/// # Ok::<(), bookshelf::BookshelfError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BookRepository {
    books: Vec<Book>,
    ids: IdGenerator,
}

impl BookRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from previously persisted books.
    ///
    /// Order is preserved. A book whose id was already taken by an earlier
    /// entry gets a fresh id, since older data could contain repeats. The id
    /// generator is advanced past every loaded id.
    #[must_use]
    pub fn with_books(books: Vec<Book>) -> Self {
        let _span = tracing::debug_span!("repository_with_books", count = books.len()).entered();

        let mut ids = IdGenerator::new();
        for book in &books {
            ids.observe(book.id);
        }

        let mut seen = HashSet::with_capacity(books.len());
        let books = books
            .into_iter()
            .map(|mut book| {
                if !seen.insert(book.id) {
                    let fresh = ids.next_id();
                    tracing::warn!(
                        old_id = %book.id,
                        new_id = %fresh,
                        title = %book.title,
                        "re-keying book with duplicate id"
                    );
                    book.id = fresh;
                    seen.insert(fresh);
                }
                book
            })
            .collect();

        Self { books, ids }
    }

    /// Replaces the whole collection with loaded data.
    pub fn replace_all(&mut self, books: Vec<Book>) {
        *self = Self::with_books(books);
    }

    /// Returns a fresh identifier, unique for the lifetime of this repository.
    pub fn generate_id(&mut self) -> BookId {
        self.ids.next_id()
    }

    /// Appends a new book and returns a copy of it.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::DuplicateTitle`] if a book with a
    /// case-insensitively equal title exists. The collection is unchanged.
    pub fn add(&mut self, new_book: NewBook) -> Result<Book> {
        let _span = tracing::debug_span!("repository_add", title = %new_book.title()).entered();

        if self.contains_title(new_book.title()) {
            tracing::debug!("rejecting duplicate title");
            return Err(BookshelfError::DuplicateTitle(new_book.title().to_string()));
        }

        let id = self.generate_id();
        let book = new_book.into_book(id);
        self.books.push(book.clone());

        tracing::debug!(book_id = %id, count = self.books.len(), "book added");
        Ok(book)
    }

    /// Whether any book has a title equal to `title`, ignoring case.
    #[must_use]
    pub fn contains_title(&self, title: &str) -> bool {
        let key = title.trim().to_lowercase();
        self.books.iter().any(|book| book.title_key() == key)
    }

    #[must_use]
    pub fn find_by_id(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Position of the book in display order, `None` if absent.
    #[must_use]
    pub fn find_index_by_id(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Flips the completion flag. Returns `false` if no book has that id.
    pub fn toggle_completion(&mut self, id: BookId) -> bool {
        let Some(index) = self.find_index_by_id(id) else {
            tracing::debug!(book_id = %id, "toggle ignored, book not found");
            return false;
        };

        let book = &mut self.books[index];
        book.is_complete = !book.is_complete;
        tracing::debug!(book_id = %id, is_complete = book.is_complete, "completion toggled");
        true
    }

    /// Removes a book. Returns `false` if no book has that id.
    pub fn remove(&mut self, id: BookId) -> bool {
        let Some(index) = self.find_index_by_id(id) else {
            tracing::debug!(book_id = %id, "remove ignored, book not found");
            return false;
        };

        let removed = self.books.remove(index);
        tracing::debug!(book_id = %id, title = %removed.title, "book removed");
        true
    }

    /// Books whose title contains `keyword`, ignoring case, in shelf order.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::EmptyKeyword`] for an empty or blank keyword,
    /// so a missing search term never returns the whole collection.
    pub fn search_by_title(&self, keyword: &str) -> Result<Vec<&Book>> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Err(BookshelfError::EmptyKeyword);
        }

        let matches: Vec<&Book> = self
            .books
            .iter()
            .filter(|book| book.title_key().contains(&needle))
            .collect();

        tracing::debug!(keyword = %needle, matches = matches.len(), "title search");
        Ok(matches)
    }

    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.books.iter().filter(|book| book.is_complete).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str) -> NewBook {
        NewBook::new(title, "Someone", 2000, false).unwrap()
    }

    fn shelf_with(titles: &[&str]) -> BookRepository {
        let mut shelf = BookRepository::new();
        for title in titles {
            shelf.add(new_book(title)).unwrap();
        }
        shelf
    }

    #[test]
    fn add_appends_in_order_with_unique_ids() {
        let shelf = shelf_with(&["Dune", "Emma", "Ulysses"]);

        let titles: Vec<&str> = shelf.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Dune", "Emma", "Ulysses"]);

        let ids: HashSet<BookId> = shelf.books().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn duplicate_title_is_rejected_ignoring_case() {
        let mut shelf = shelf_with(&["Dune"]);

        let err = shelf.add(new_book("  dUNE ")).unwrap_err();
        assert!(matches!(err, BookshelfError::DuplicateTitle(ref t) if t == "dUNE"));
        assert_eq!(shelf.len(), 1);
    }

    #[test]
    fn find_index_reports_missing_as_none() {
        let shelf = shelf_with(&["Dune", "Emma"]);
        let emma = shelf.books()[1].id;

        assert_eq!(shelf.find_index_by_id(emma), Some(1));
        assert_eq!(shelf.find_index_by_id(BookId(-1)), None);
    }

    #[test]
    fn toggle_missing_id_is_a_no_op() {
        let mut shelf = shelf_with(&["Dune"]);
        assert!(!shelf.toggle_completion(BookId(7)));
        assert_eq!(shelf.completed_count(), 0);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut shelf = shelf_with(&["A", "B", "C", "D"]);
        let b = shelf.books()[1].id;

        assert!(shelf.remove(b));
        assert!(!shelf.remove(b));

        let titles: Vec<&str> = shelf.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["A", "C", "D"]);
    }

    #[test]
    fn search_matches_substrings_ignoring_case() {
        let shelf = shelf_with(&["The Hobbit", "Dune", "The Silmarillion", "Hobbit Tales"]);

        let found: Vec<&str> = shelf
            .search_by_title("  HOBBIT")
            .unwrap()
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(found, ["The Hobbit", "Hobbit Tales"]);

        assert!(shelf.search_by_title("zzz").unwrap().is_empty());
    }

    #[test]
    fn blank_search_keyword_is_rejected() {
        let shelf = shelf_with(&["Dune"]);
        assert!(matches!(shelf.search_by_title(""), Err(BookshelfError::EmptyKeyword)));
        assert!(matches!(shelf.search_by_title(" \t"), Err(BookshelfError::EmptyKeyword)));
    }

    #[test]
    fn loading_rekeys_repeated_ids_and_advances_generator() {
        let book = |id: i64, title: &str| Book {
            id: BookId(id),
            title: title.to_string(),
            author: "A".to_string(),
            year: 1999,
            is_complete: false,
        };
        let far_future = chrono::Utc::now().timestamp_millis() + 10_000_000;

        let mut shelf = BookRepository::with_books(vec![
            book(far_future, "First"),
            book(far_future, "Second"),
            book(5, "Third"),
        ]);

        let ids: Vec<BookId> = shelf.books().iter().map(|b| b.id).collect();
        assert_eq!(ids[0], BookId(far_future));
        assert_eq!(ids[1], BookId(far_future + 1));
        assert_eq!(ids[2], BookId(5));
        assert_eq!(shelf.generate_id(), BookId(far_future + 2));
    }

    #[test]
    fn ids_stay_unique_when_loaded_at_i64_max() {
        let book = |title: &str| Book {
            id: BookId(i64::MAX),
            title: title.to_string(),
            author: "A".to_string(),
            year: 1999,
            is_complete: false,
        };

        let mut shelf = BookRepository::with_books(vec![book("A"), book("B")]);
        let added = shelf.add(new_book("C")).unwrap();

        let ids: HashSet<BookId> = shelf.books().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(shelf.find_by_id(added.id).map(|b| b.title.as_str()), Some("C"));
    }
}
