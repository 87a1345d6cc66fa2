//! Interaction controller wiring user intents to the core.
//!
//! The [`Controller`] owns the repository, the storage adapter, and the view
//! synchronizer, all injected at construction. Each intent runs to completion
//! synchronously: validate, mutate, render, persist. Failures never escape an
//! intent; they come back as [`Notice`]s inside an [`Outcome`] for the surface
//! to display.
//!
//! # Intent Flow
//!
//! ```text
//! add/toggle/delete:  validate → repository → render(all) → save
//! search:             validate keyword → repository → render(subset)
//! startup:            probe → load → render(all)
//! ```
//!
//! Nothing is written before a load has succeeded. Until `startup` runs the
//! mutating intents are refused; when the stored shelf could not be read they
//! still change the session but saves are refused, so the unread data is
//! never overwritten.

use crate::app::form::BookForm;
use crate::domain::error::BookshelfError;
use crate::domain::{BookId, BookRepository};
use crate::storage::{SaveReport, StorageAdapter};
use crate::ui::synchronizer::ViewSynchronizer;
use crate::ui::viewmodel::{NoticeLevel, ShelfView, ViewScope};

/// User-visible message produced by an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The collection was written to storage.
    Saved(SaveReport),
    /// Something degraded but the session works, e.g. storage is unavailable.
    Warning(String),
    /// An intent was rejected or a save failed.
    Error(String),
}

impl Notice {
    /// Wraps an error as an error-level notice.
    #[must_use]
    pub fn from_error(err: &BookshelfError) -> Self {
        Self::Error(err.to_string())
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Saved(report) => match report.books {
                1 => "Saved 1 book".to_string(),
                n => format!("Saved {n} books"),
            },
            Self::Warning(message) | Self::Error(message) => message.clone(),
        }
    }

    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::Saved(_) => NoticeLevel::Info,
            Self::Warning(_) => NoticeLevel::Warning,
            Self::Error(_) => NoticeLevel::Error,
        }
    }
}

/// What an intent did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the shelves were re-rendered.
    pub rendered: bool,
    /// Notices in the order they were raised.
    pub notices: Vec<Notice>,
}

impl Outcome {
    fn rendered() -> Self {
        Self {
            rendered: true,
            notices: Vec::new(),
        }
    }

    fn rejected(err: &BookshelfError) -> Self {
        Self {
            rendered: false,
            notices: vec![Notice::from_error(err)],
        }
    }

    /// The most severe notice, the latest one among equals.
    #[must_use]
    pub fn headline(&self) -> Option<&Notice> {
        self.notices.iter().max_by_key(|notice| match notice.level() {
            NoticeLevel::Info => 0,
            NoticeLevel::Warning => 1,
            NoticeLevel::Error => 2,
        })
    }
}

/// How far the stored shelf has been brought into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    /// `startup` has not run yet.
    Pending,
    /// The stored shelf (or its absence) is reflected in the repository.
    Loaded,
    /// The stored shelf could not be read; it must not be overwritten.
    Unsaved,
}

/// Coordinates intents across repository, synchronizer, and storage.
///
/// # Examples
///
/// ```
/// use bookshelf::app::{BookForm, Controller};
/// use bookshelf::storage::{MemoryStore, StorageAdapter};
///
/// let mut controller = Controller::new(StorageAdapter::new(Box::new(MemoryStore::new())));
/// controller.startup();
///
/// let mut form = BookForm::filled("Dune", "Frank Herbert", "1965", false);
/// let outcome = controller.add(&mut form);
///
/// assert!(outcome.rendered);
/// assert_eq!(controller.view().incomplete[0].title, "Dune");
/// assert_eq!(form, BookForm::default());
/// ```
#[derive(Debug)]
pub struct Controller {
    repository: BookRepository,
    storage: StorageAdapter,
    sync: ViewSynchronizer,
    load_state: LoadState,
}

impl Controller {
    /// Creates a controller with an empty collection.
    ///
    /// Nothing is loaded until [`startup`](Self::startup) runs.
    #[must_use]
    pub fn new(storage: StorageAdapter) -> Self {
        Self {
            repository: BookRepository::new(),
            storage,
            sync: ViewSynchronizer::new(),
            load_state: LoadState::Pending,
        }
    }

    /// Loads the persisted collection and renders it.
    ///
    /// Unavailable storage yields a warning and an empty shelf. Corrupt data
    /// yields an error, is copied aside, and the session starts empty. In
    /// both cases, and whenever the stored shelf cannot be read, later
    /// changes stay in the session and are not saved.
    pub fn startup(&mut self) -> Outcome {
        let _span = tracing::info_span!("startup").entered();
        let mut outcome = Outcome::rendered();
        self.load_state = LoadState::Unsaved;

        if self.storage.is_available() {
            match self.storage.load() {
                Ok(books) => {
                    tracing::info!(count = books.len(), "bookshelf loaded");
                    self.repository.replace_all(books);
                    self.load_state = LoadState::Loaded;
                }
                Err(err @ BookshelfError::Parse(_)) => {
                    tracing::error!(error = %err, "stored bookshelf is corrupt");
                    match self.storage.preserve_corrupt() {
                        Ok(()) => self.load_state = LoadState::Loaded,
                        Err(backup_err) => {
                            tracing::warn!(error = %backup_err, "could not preserve corrupt bookshelf");
                        }
                    }
                    self.repository.replace_all(Vec::new());
                    outcome.notices.push(Notice::from_error(&err));
                }
                Err(err) => {
                    tracing::warn!(error = %err, kind = err.kind(), "bookshelf load failed");
                    self.repository.replace_all(Vec::new());
                    outcome.notices.push(Notice::from_error(&err));
                }
            }
        } else {
            let err = BookshelfError::StorageUnavailable(
                "changes will not be saved this session".to_string(),
            );
            outcome.notices.push(Notice::Warning(err.to_string()));
        }

        self.render_all();
        outcome
    }

    /// Adds the book described by `form`.
    ///
    /// On success the form is cleared. On a validation or duplicate failure
    /// nothing changes, the form keeps its contents, and the outcome carries a
    /// single error notice.
    pub fn add(&mut self, form: &mut BookForm) -> Outcome {
        let _span = tracing::debug_span!("intent_add").entered();
        if let Some(refused) = self.refuse_before_startup() {
            return refused;
        }

        let added = form
            .validate()
            .and_then(|new_book| self.repository.add(new_book));

        match added {
            Ok(book) => {
                tracing::info!(book_id = %book.id, title = %book.title, "book added");
                let outcome = self.render_and_persist();
                form.clear();
                outcome
            }
            Err(err) => {
                tracing::debug!(error = %err, kind = err.kind(), "add rejected");
                Outcome::rejected(&err)
            }
        }
    }

    /// Flips a book between the shelves. Unknown ids are ignored.
    pub fn toggle(&mut self, id: BookId) -> Outcome {
        let _span = tracing::debug_span!("intent_toggle", book_id = %id).entered();
        if let Some(refused) = self.refuse_before_startup() {
            return refused;
        }

        if self.repository.toggle_completion(id) {
            self.render_and_persist()
        } else {
            Outcome::default()
        }
    }

    /// Deletes a book. Unknown ids are ignored.
    pub fn delete(&mut self, id: BookId) -> Outcome {
        let _span = tracing::debug_span!("intent_delete", book_id = %id).entered();
        if let Some(refused) = self.refuse_before_startup() {
            return refused;
        }

        if self.repository.remove(id) {
            self.render_and_persist()
        } else {
            Outcome::default()
        }
    }

    /// Renders only the books whose title contains `keyword`.
    ///
    /// The search view lasts until the next mutation or [`show_all`](Self::show_all).
    pub fn search(&mut self, keyword: &str) -> Outcome {
        let _span = tracing::debug_span!("intent_search").entered();

        match self.repository.search_by_title(keyword) {
            Ok(matches) => {
                let scope = ViewScope::Search {
                    keyword: keyword.trim().to_string(),
                };
                self.sync.render(matches, scope);
                Outcome::rendered()
            }
            Err(err) => Outcome::rejected(&err),
        }
    }

    /// Renders the full collection again.
    pub fn show_all(&mut self) -> Outcome {
        self.render_all();
        Outcome::rendered()
    }

    #[must_use]
    pub const fn repository(&self) -> &BookRepository {
        &self.repository
    }

    /// The shelves as last rendered.
    #[must_use]
    pub const fn view(&self) -> &ShelfView {
        self.sync.view()
    }

    fn render_all(&mut self) {
        self.sync.render(self.repository.books(), ViewScope::All);
    }

    fn refuse_before_startup(&self) -> Option<Outcome> {
        (self.load_state == LoadState::Pending).then(|| {
            tracing::debug!("intent refused, bookshelf not loaded yet");
            Outcome::rejected(&BookshelfError::StorageUnavailable(
                "the saved bookshelf has not been loaded yet".to_string(),
            ))
        })
    }

    fn render_and_persist(&mut self) -> Outcome {
        self.render_all();

        let saved = match self.load_state {
            LoadState::Loaded => self.storage.save(self.repository.books()),
            LoadState::Pending | LoadState::Unsaved => Err(BookshelfError::StorageUnavailable(
                "the saved bookshelf could not be read, so changes are not saved".to_string(),
            )),
        };

        let notice = match saved {
            Ok(report) => Notice::Saved(report),
            Err(err) => {
                tracing::error!(error = %err, kind = err.kind(), "save failed");
                Notice::from_error(&err)
            }
        };

        Outcome {
            rendered: true,
            notices: vec![notice],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, STORAGE_KEY};
    use std::sync::{Arc, Mutex};

    fn controller() -> Controller {
        let mut controller = Controller::new(StorageAdapter::new(Box::new(MemoryStore::new())));
        controller.startup();
        controller
    }

    fn add(controller: &mut Controller, title: &str, done: bool) -> BookId {
        let mut form = BookForm::filled(title, "Someone", "2000", done);
        let outcome = controller.add(&mut form);
        assert!(outcome.rendered, "{outcome:?}");
        controller
            .repository()
            .books()
            .iter()
            .find(|b| b.title == title)
            .map(|b| b.id)
            .unwrap()
    }

    #[test]
    fn invalid_form_is_rejected_and_kept() {
        let mut controller = controller();
        let generation = controller.view().generation;
        let mut form = BookForm::filled("Dune", "", "1965", false);

        let outcome = controller.add(&mut form);

        assert!(!outcome.rendered);
        assert_eq!(outcome.notices, vec![Notice::Error("Author is required".into())]);
        assert_eq!(form.title, "Dune");
        assert_eq!(controller.view().generation, generation);
        assert!(controller.repository().is_empty());
    }

    #[test]
    fn duplicate_title_yields_one_error() {
        let mut controller = controller();
        add(&mut controller, "Dune", false);

        let mut form = BookForm::filled("DUNE", "Other", "1999", false);
        let outcome = controller.add(&mut form);

        assert_eq!(outcome.notices.len(), 1);
        assert_eq!(outcome.headline().map(Notice::level), Some(NoticeLevel::Error));
        assert_eq!(controller.repository().len(), 1);
    }

    #[test]
    fn mutations_render_then_save() {
        let mut controller = controller();
        let id = add(&mut controller, "Dune", false);

        let outcome = controller.toggle(id);
        assert!(matches!(outcome.notices[..], [Notice::Saved(SaveReport { books: 1, .. })]));
        assert_eq!(controller.view().complete[0].id, id);

        let outcome = controller.delete(id);
        assert!(outcome.rendered);
        assert!(controller.view().is_empty());
    }

    #[test]
    fn unknown_ids_are_silent() {
        let mut controller = controller();
        add(&mut controller, "Dune", false);

        assert_eq!(controller.toggle(BookId(-5)), Outcome::default());
        assert_eq!(controller.delete(BookId(-5)), Outcome::default());
        assert_eq!(controller.repository().len(), 1);
    }

    #[test]
    fn search_renders_subset_until_next_mutation() {
        let mut controller = controller();
        add(&mut controller, "The Hobbit", false);
        let dune = add(&mut controller, "Dune", true);

        controller.search("hob");
        assert!(controller.view().is_search());
        assert_eq!(controller.view().len(), 1);

        controller.toggle(dune);
        assert!(!controller.view().is_search());
        assert_eq!(controller.view().len(), 2);
    }

    #[test]
    fn empty_search_keeps_current_view() {
        let mut controller = controller();
        add(&mut controller, "Dune", false);
        let generation = controller.view().generation;

        let outcome = controller.search("   ");

        assert_eq!(
            outcome.notices,
            vec![Notice::Error(BookshelfError::EmptyKeyword.to_string())]
        );
        assert_eq!(controller.view().generation, generation);
    }

    #[test]
    fn unavailable_storage_warns_and_still_mutates() {
        let mut controller = Controller::new(StorageAdapter::new(Box::new(MemoryStore::with_quota(0))));

        let outcome = controller.startup();
        assert!(outcome.rendered);
        assert!(matches!(outcome.notices[..], [Notice::Warning(_)]));

        let mut form = BookForm::filled("Dune", "Frank Herbert", "1965", false);
        let outcome = controller.add(&mut form);
        assert!(outcome.rendered);
        assert!(matches!(outcome.notices[..], [Notice::Error(_)]));
        assert_eq!(controller.view().incomplete.len(), 1);
    }

    #[test]
    fn corrupt_data_starts_empty_with_error() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, b"not json").unwrap();
        let mut controller = Controller::new(StorageAdapter::new(Box::new(store)));

        let outcome = controller.startup();

        assert!(outcome.rendered);
        assert_eq!(outcome.headline().map(Notice::level), Some(NoticeLevel::Error));
        assert!(controller.view().is_empty());
    }

    fn seeded_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                br#"{"version":1,"books":[{"id":1,"title":"Old A","author":"X","year":1990,"isComplete":false},{"id":2,"title":"Old B","author":"Y","year":1991,"isComplete":true}]}"#,
            )
            .unwrap();
        store
    }

    #[test]
    fn intents_before_startup_are_refused() {
        let mut controller = Controller::new(StorageAdapter::new(Box::new(seeded_store())));

        let mut form = BookForm::filled("Dune", "Frank Herbert", "1965", false);
        let outcome = controller.add(&mut form);
        assert!(!outcome.rendered);
        assert!(matches!(outcome.notices[..], [Notice::Error(_)]));
        assert_eq!(form.title, "Dune");
        assert!(!controller.toggle(BookId(1)).rendered);
        assert!(!controller.delete(BookId(2)).rendered);

        controller.startup();
        let titles: Vec<_> = controller.repository().books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Old A", "Old B"]);

        let outcome = controller.add(&mut form);
        assert!(matches!(outcome.notices[..], [Notice::Saved(SaveReport { books: 3, .. })]));
    }

    /// Medium whose reads fail while writes succeed.
    #[derive(Debug, Clone, Default)]
    struct UnreadableStore(Arc<Mutex<MemoryStore>>);

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> crate::domain::Result<Option<Vec<u8>>> {
            Err(BookshelfError::Storage("read failed".into()))
        }

        fn set(&mut self, key: &str, value: &[u8]) -> crate::domain::Result<()> {
            self.0.lock().unwrap().set(key, value)
        }

        fn remove(&mut self, key: &str) -> crate::domain::Result<()> {
            self.0.lock().unwrap().remove(key)
        }
    }

    #[test]
    fn unreadable_shelf_is_never_overwritten() {
        let shared = UnreadableStore(Arc::new(Mutex::new(seeded_store())));
        let before = shared.0.lock().unwrap().get(STORAGE_KEY).unwrap();
        let mut controller = Controller::new(StorageAdapter::new(Box::new(shared.clone())));

        let outcome = controller.startup();
        assert_eq!(outcome.headline().map(Notice::level), Some(NoticeLevel::Error));
        assert!(controller.repository().is_empty());

        let mut form = BookForm::filled("Dune", "Frank Herbert", "1965", false);
        let outcome = controller.add(&mut form);
        assert!(outcome.rendered);
        assert!(matches!(outcome.notices[..], [Notice::Error(_)]));
        assert_eq!(controller.view().incomplete.len(), 1);

        let id = controller.repository().books()[0].id;
        controller.toggle(id);
        controller.delete(id);

        assert_eq!(shared.0.lock().unwrap().get(STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn saved_notice_pluralizes() {
        let one = Notice::Saved(SaveReport { books: 1, bytes: 10 });
        let many = Notice::Saved(SaveReport { books: 3, bytes: 10 });
        assert_eq!(one.message(), "Saved 1 book");
        assert_eq!(many.message(), "Saved 3 books");
    }
}
