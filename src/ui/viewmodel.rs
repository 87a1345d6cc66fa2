//! View model types representing renderable UI state.
//!
//! Two layers live here. [`ShelfView`] and [`BookEntry`] are the data-only
//! output of the view synchronizer: two ordered streams of entries, one per
//! shelf. [`UIViewModel`] and its parts are the screen layout computed from
//! `AppState` for the ANSI renderer, with selection, windowing, and mode
//! chrome already resolved.
//!
//! Neither layer contains business logic.

use crate::domain::{Book, BookId};

/// Label of the toggle action on an unread book.
pub const MARK_COMPLETE: &str = "Mark complete";

/// Label of the toggle action on a finished book.
pub const MARK_INCOMPLETE: &str = "Mark incomplete";

/// One rendered book, with the id needed to wire its actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub is_complete: bool,
    /// "Mark complete" or "Mark incomplete".
    pub toggle_label: &'static str,
}

impl From<&Book> for BookEntry {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            is_complete: book.is_complete,
            toggle_label: if book.is_complete { MARK_INCOMPLETE } else { MARK_COMPLETE },
        }
    }
}

/// What the rendered shelves were built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewScope {
    /// The full collection.
    #[default]
    All,
    /// The result of a title search.
    Search { keyword: String },
}

/// The two named output streams of the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfView {
    /// Books not yet read, in collection order.
    pub incomplete: Vec<BookEntry>,
    /// Finished books, in collection order.
    pub complete: Vec<BookEntry>,
    pub scope: ViewScope,
    /// Incremented on every render.
    pub generation: u64,
}

impl ShelfView {
    #[must_use]
    pub fn len(&self) -> usize {
        self.incomplete.len() + self.complete.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incomplete.is_empty() && self.complete.is_empty()
    }

    #[must_use]
    pub const fn is_search(&self) -> bool {
        matches!(self.scope, ViewScope::Search { .. })
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Unread shelf first, finished shelf second.
    pub shelves: Vec<ShelfPanel>,

    /// Column widths shared by both shelves.
    pub columns: ColumnLayout,

    /// Present while the add form is open.
    pub form: Option<FormInfo>,

    /// Present while a search keyword is being typed.
    pub search_bar: Option<SearchBarInfo>,

    /// Latest notice produced by an intent.
    pub notice: Option<NoticeInfo>,

    pub footer: FooterInfo,

    /// Shown instead of the shelves when there is nothing to list.
    pub empty_state: Option<EmptyState>,
}

/// One shelf section of the screen.
#[derive(Debug, Clone)]
pub struct ShelfPanel {
    /// Section title with count, e.g. "Unread (3)".
    pub title: String,

    /// Whether keyboard selection is on this shelf.
    pub is_focused: bool,

    /// True for the finished-reading shelf.
    pub is_complete: bool,

    /// Visible window of rows.
    pub rows: Vec<DisplayItem>,

    /// Rows hidden above and below the window.
    pub hidden_above: usize,
    pub hidden_below: usize,
}

/// Character widths of the book table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub title: usize,
    pub author: usize,
    pub year: usize,
    pub action: usize,
}

impl ColumnLayout {
    /// Spaces between two columns.
    pub const GAP: usize = 2;

    const YEAR_WIDTH: usize = 6;
    const ACTION_WIDTH: usize = MARK_INCOMPLETE.len() + 1;

    /// Fixed year and action columns; title and author share what is left.
    ///
    /// ```
    /// use bookshelf::ui::viewmodel::ColumnLayout;
    ///
    /// let layout = ColumnLayout::for_width(100);
    /// assert_eq!((layout.title, layout.author), (36, 36));
    /// ```
    #[must_use]
    pub const fn for_width(cols: usize) -> Self {
        let rest = cols.saturating_sub(Self::YEAR_WIDTH + Self::ACTION_WIDTH + 3 * Self::GAP);
        let author = rest / 2;
        Self {
            title: rest - author,
            author,
            year: Self::YEAR_WIDTH,
            action: Self::ACTION_WIDTH,
        }
    }
}

/// Display information for a single book row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub title: String,
    pub author: String,
    pub year: String,
    pub action: &'static str,
    pub is_selected: bool,

    /// Character ranges of the title matching the active search keyword.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Add-form display information.
#[derive(Debug, Clone)]
pub struct FormInfo {
    pub fields: Vec<FormFieldInfo>,
}

/// One labelled input of the add form.
#[derive(Debug, Clone)]
pub struct FormFieldInfo {
    pub label: &'static str,
    pub value: String,
    pub is_focused: bool,
    /// False for the checkbox, which shows no text cursor.
    pub is_text: bool,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
}

/// Severity of a displayed notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Notice line display information.
#[derive(Debug, Clone)]
pub struct NoticeInfo {
    pub level: NoticeLevel,
    pub message: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
