//! Projection of the book collection into the two rendered shelves.
//!
//! The synchronizer turns books into data-only [`BookEntry`] values split by
//! completion status. Every render starts from empty shelves and rebuilds
//! them completely; collections are small and session-local, so there is no
//! diffing.

use crate::domain::Book;
use crate::ui::viewmodel::{BookEntry, ShelfView, ViewScope};

/// Splits books into `(incomplete, complete)`, keeping relative order in each.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::{Book, BookId};
/// use bookshelf::ui::partition;
///
/// let book = |id, done| Book {
///     id: BookId(id),
///     title: format!("Book {id}"),
///     author: "Anon".into(),
///     year: 2000,
///     is_complete: done,
/// };
/// let books = [book(1, true), book(2, false), book(3, true)];
///
/// let (incomplete, complete) = partition(&books);
/// assert_eq!(incomplete.iter().map(|b| b.id.0).collect::<Vec<_>>(), [2]);
/// assert_eq!(complete.iter().map(|b| b.id.0).collect::<Vec<_>>(), [1, 3]);
/// ```
#[must_use]
pub fn partition<'a, I>(books: I) -> (Vec<&'a Book>, Vec<&'a Book>)
where
    I: IntoIterator<Item = &'a Book>,
{
    books.into_iter().partition(|book| !book.is_complete)
}

/// Holds the currently rendered shelves and rebuilds them on request.
#[derive(Debug, Clone, Default)]
pub struct ViewSynchronizer {
    view: ShelfView,
}

impl ViewSynchronizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears both shelves and fills them from `books`.
    ///
    /// `scope` records whether `books` is the full collection or a search
    /// subset, so the surface can say which one is on screen.
    pub fn render<'a, I>(&mut self, books: I, scope: ViewScope)
    where
        I: IntoIterator<Item = &'a Book>,
    {
        let (incomplete, complete) = partition(books);

        self.view.incomplete.clear();
        self.view.complete.clear();
        self.view.incomplete.extend(incomplete.into_iter().map(BookEntry::from));
        self.view.complete.extend(complete.into_iter().map(BookEntry::from));
        self.view.scope = scope;
        self.view.generation = self.view.generation.wrapping_add(1);

        tracing::debug!(
            incomplete = self.view.incomplete.len(),
            complete = self.view.complete.len(),
            scope = ?self.view.scope,
            generation = self.view.generation,
            "shelves rendered"
        );
    }

    /// The most recently rendered shelves.
    #[must_use]
    pub const fn view(&self) -> &ShelfView {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookId;

    fn book(id: i64, done: bool) -> Book {
        Book {
            id: BookId(id),
            title: format!("Book {id}"),
            author: "Anon".into(),
            year: 1990,
            is_complete: done,
        }
    }

    #[test]
    fn partition_is_stable() {
        let books = [book(1, false), book(2, true), book(3, false), book(4, true), book(5, false)];
        let (incomplete, complete) = partition(&books);

        let ids = |v: &[&Book]| v.iter().map(|b| b.id.0).collect::<Vec<_>>();
        assert_eq!(ids(&incomplete), [1, 3, 5]);
        assert_eq!(ids(&complete), [2, 4]);
    }

    #[test]
    fn render_replaces_previous_content() {
        let mut sync = ViewSynchronizer::new();

        sync.render(&[book(1, false), book(2, true)], ViewScope::All);
        assert_eq!(sync.view().incomplete.len(), 1);
        assert_eq!(sync.view().complete.len(), 1);

        sync.render(&[book(3, true)], ViewScope::All);
        assert!(sync.view().incomplete.is_empty());
        assert_eq!(sync.view().complete[0].id, BookId(3));
        assert_eq!(sync.view().generation, 2);
    }

    #[test]
    fn entries_carry_toggle_labels() {
        let mut sync = ViewSynchronizer::new();
        sync.render(&[book(1, false), book(2, true)], ViewScope::All);

        assert_eq!(sync.view().incomplete[0].toggle_label, "Mark complete");
        assert_eq!(sync.view().complete[0].toggle_label, "Mark incomplete");
    }

    #[test]
    fn search_scope_is_recorded() {
        let mut sync = ViewSynchronizer::new();
        let books = [book(1, false)];
        sync.render(books.iter(), ViewScope::Search { keyword: "book".into() });

        assert!(sync.view().is_search());
        assert_eq!(sync.view().len(), 1);
    }
}
