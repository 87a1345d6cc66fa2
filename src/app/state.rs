//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the state container for the plugin: the
//! interaction controller plus everything the surface needs on top of it
//! (input mode, form buffer, search query, keyboard selection, last notice,
//! theme).
//!
//! # Selection Model
//!
//! Selection is a shelf ([`ShelfFocus`]) plus an index into that shelf's
//! rendered entries. The index is clamped after every intent, since toggles
//! and deletes move books between or off the shelves.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns the last rendered [`ShelfView`] into a
//! [`UIViewModel`] for the current terminal size: mode chrome, per-shelf
//! windows around the selection, truncated columns, and search highlights.

use super::controller::{Controller, Notice, Outcome};
use super::form::BookForm;
use super::modes::{FormField, InputMode, ShelfFocus};
use crate::domain::BookId;
use crate::ui::helpers::{substring_ranges, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BookEntry, ColumnLayout, DisplayItem, EmptyState, FooterInfo, FormFieldInfo, FormInfo,
    HeaderInfo, NoticeInfo, SearchBarInfo, ShelfPanel, ShelfView, UIViewModel, ViewScope,
};

/// Rows used by the fixed chrome: blank, header, border on top; notice,
/// border, footer at the bottom.
const FIXED_CHROME_ROWS: usize = 6;

/// Rows used by each shelf for its title and column headers.
const SHELF_CHROME_ROWS: usize = 2;

/// Rows used by the search box.
const SEARCH_BAR_ROWS: usize = 3;

/// Rows used by the add form: one per field plus top and bottom border.
const FORM_ROWS: usize = FormField::ALL.len() + 2;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Owner of the collection, storage, and rendered shelves.
    pub controller: Controller,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Add-form inputs. Kept across cancel so a half-typed book survives.
    pub form: BookForm,

    /// Keyword being typed in search mode.
    pub search_query: String,

    /// Shelf holding the selection.
    pub focus: ShelfFocus,

    /// Zero-based index into the focused shelf.
    pub selected_index: usize,

    /// Most severe notice of the latest intent.
    pub notice: Option<Notice>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates state around a controller that has not started up yet.
    #[must_use]
    pub fn new(controller: Controller, theme: Theme) -> Self {
        Self {
            controller,
            input_mode: InputMode::Browse,
            form: BookForm::default(),
            search_query: String::new(),
            focus: ShelfFocus::default(),
            selected_index: 0,
            notice: None,
            theme,
        }
    }

    /// Shelves as last rendered by the controller.
    #[must_use]
    pub const fn view(&self) -> &ShelfView {
        self.controller.view()
    }

    /// Entries of the given shelf.
    #[must_use]
    pub fn shelf(&self, focus: ShelfFocus) -> &[BookEntry] {
        match focus {
            ShelfFocus::Incomplete => &self.view().incomplete,
            ShelfFocus::Complete => &self.view().complete,
        }
    }

    /// Id of the highlighted book, if the focused shelf has any.
    #[must_use]
    pub fn selected_book_id(&self) -> Option<BookId> {
        self.shelf(self.focus).get(self.selected_index).map(|entry| entry.id)
    }

    /// Moves selection down, wrapping to the top of the shelf.
    pub fn move_selection_down(&mut self) {
        let len = self.shelf(self.focus).len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection up, wrapping to the bottom of the shelf.
    pub fn move_selection_up(&mut self) {
        let len = self.shelf(self.focus).len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Moves selection to the other shelf.
    pub fn switch_shelf(&mut self) {
        self.focus = self.focus.other();
        self.clamp_selection();
    }

    /// Keeps the selection index inside the focused shelf.
    pub fn clamp_selection(&mut self) {
        let len = self.shelf(self.focus).len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
    }

    /// Puts the selection on a book if it is rendered.
    pub fn select_book(&mut self, id: BookId) {
        for focus in [ShelfFocus::Incomplete, ShelfFocus::Complete] {
            if let Some(index) = self.shelf(focus).iter().position(|entry| entry.id == id) {
                self.focus = focus;
                self.selected_index = index;
                return;
            }
        }
    }

    /// Focuses the first non-empty shelf and selects its first book.
    pub fn reset_selection(&mut self) {
        self.focus = if self.view().incomplete.is_empty() && !self.view().complete.is_empty() {
            ShelfFocus::Complete
        } else {
            ShelfFocus::Incomplete
        };
        self.selected_index = 0;
    }

    /// Records the result of an intent.
    ///
    /// The headline notice replaces the previous one; an intent without
    /// notices clears it.
    pub fn apply_outcome(&mut self, outcome: &Outcome) {
        self.notice = outcome.headline().cloned();
        if outcome.rendered {
            self.clamp_selection();
        }
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract chrome (header, footer, notice, form or search box, shelf titles)
    /// 2. Split the remaining rows between the shelves, giving unused space
    ///    of a short shelf to the other one
    /// 3. Center each shelf's window on its selection, adjusted near the end
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let view = self.view();
        let columns = ColumnLayout::for_width(cols);
        let keyword = match &view.scope {
            ViewScope::Search { keyword } => Some(keyword.as_str()),
            ViewScope::All => None,
        };

        let empty_state = view.is_empty().then(|| Self::compute_empty_state(keyword));

        let shelves = if empty_state.is_some() {
            vec![]
        } else {
            let available = self.calculate_available_rows(rows);
            let (cap_incomplete, cap_complete) =
                split_capacity(available, view.incomplete.len(), view.complete.len());

            vec![
                self.compute_panel(ShelfFocus::Incomplete, cap_incomplete, &columns, keyword),
                self.compute_panel(ShelfFocus::Complete, cap_complete, &columns, keyword),
            ]
        };

        UIViewModel {
            header: self.compute_header(),
            shelves,
            columns,
            form: self.compute_form(),
            search_bar: self.compute_search_bar(),
            notice: self.notice.as_ref().map(|notice| NoticeInfo {
                level: notice.level(),
                message: notice.message(),
            }),
            footer: self.compute_footer(),
            empty_state,
        }
    }

    fn compute_panel(
        &self,
        focus: ShelfFocus,
        capacity: usize,
        columns: &ColumnLayout,
        keyword: Option<&str>,
    ) -> ShelfPanel {
        let entries = self.shelf(focus);
        let is_focused = self.focus == focus && self.input_mode == InputMode::Browse;
        let selected = is_focused.then_some(self.selected_index);

        let (start, end) = visible_window(entries.len(), selected, capacity);

        let rows = entries[start..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let is_selected = selected == Some(start + offset);
                Self::compute_display_item(entry, is_selected, columns, keyword)
            })
            .collect();

        let label = match focus {
            ShelfFocus::Incomplete => "Not yet read",
            ShelfFocus::Complete => "Finished reading",
        };

        ShelfPanel {
            title: format!("{label} ({})", entries.len()),
            is_focused,
            is_complete: focus == ShelfFocus::Complete,
            rows,
            hidden_above: start,
            hidden_below: entries.len() - end,
        }
    }

    /// Builds one row, truncating to the column widths and clipping highlight
    /// ranges to the part of the title that stays visible.
    fn compute_display_item(
        entry: &BookEntry,
        is_selected: bool,
        columns: &ColumnLayout,
        keyword: Option<&str>,
    ) -> DisplayItem {
        let title = truncate(&entry.title, columns.title);
        let title_len = entry.title.chars().count();
        let visible = if title_len > columns.title {
            columns.title.saturating_sub(3)
        } else {
            title_len
        };

        let highlight_ranges = keyword
            .map(|kw| {
                substring_ranges(&entry.title, kw)
                    .into_iter()
                    .filter(|&(start, _)| start < visible)
                    .map(|(start, end)| (start, end.min(visible)))
                    .collect()
            })
            .unwrap_or_default();

        DisplayItem {
            title,
            author: truncate(&entry.author, columns.author),
            year: entry.year.to_string(),
            action: entry.toggle_label,
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.view().scope {
            ViewScope::Search { keyword } => {
                format!(" Books matching \"{keyword}\" ({}) ", self.view().len())
            }
            ViewScope::All => {
                let repository = self.controller.repository();
                format!(
                    " Bookshelf: {} books, {} finished ",
                    repository.len(),
                    repository.completed_count()
                )
            }
        };
        HeaderInfo { title }
    }

    fn compute_empty_state(keyword: Option<&str>) -> EmptyState {
        match keyword {
            Some(keyword) => EmptyState {
                message: format!("No books match \"{keyword}\""),
                subtitle: "Esc: show all books".to_string(),
            },
            None => EmptyState {
                message: "Your bookshelf is empty".to_string(),
                subtitle: "Press 'a' to add a book".to_string(),
            },
        }
    }

    fn compute_form(&self) -> Option<FormInfo> {
        let InputMode::Form(focused) = self.input_mode else {
            return None;
        };

        let fields = FormField::ALL
            .iter()
            .map(|&field| FormFieldInfo {
                label: field.label(),
                value: self.form.display_value(field),
                is_focused: field == focused,
                is_text: field != FormField::Complete,
            })
            .collect();

        Some(FormInfo { fields })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        (self.input_mode == InputMode::Search).then(|| SearchBarInfo {
            query: self.search_query.clone(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Form(FormField::Complete) => {
                "Space: check/uncheck  Tab/Shift+Tab: field  Enter: add  Esc: cancel"
            }
            InputMode::Form(_) => "Type to fill in  Tab/Shift+Tab: field  Enter: add  Esc: cancel",
            InputMode::Search => "Type a title keyword  Enter: search  Esc: cancel",
            InputMode::Browse if self.view().is_search() => {
                "j/k: move  Tab: shelf  Enter: toggle  d: delete  Esc: show all  q: quit"
            }
            InputMode::Browse => {
                "j/k: move  Tab: shelf  Enter: toggle  d: delete  a: add  /: search  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for book rows across both shelves.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let mode_rows = match self.input_mode {
            InputMode::Browse => 0,
            InputMode::Search => SEARCH_BAR_ROWS,
            InputMode::Form(_) => FORM_ROWS,
        };
        total_rows.saturating_sub(FIXED_CHROME_ROWS + 2 * SHELF_CHROME_ROWS + mode_rows)
    }
}

/// Splits `total` rows between two shelves holding `a` and `b` books.
///
/// Each shelf gets half; a shelf needing less than its half hands the rest
/// to the other.
#[must_use]
pub fn split_capacity(total: usize, a: usize, b: usize) -> (usize, usize) {
    let half = total / 2;
    if a <= half {
        (a, total - a)
    } else if b <= total - half {
        (total - b, b)
    } else {
        (half, total - half)
    }
}

/// Range `[start, end)` of a list of `len` items shown in `capacity` rows.
///
/// The window is centered on `selected` and shifted back near the end so it
/// stays full. Without a selection it starts at the top.
#[must_use]
pub fn visible_window(len: usize, selected: Option<usize>, capacity: usize) -> (usize, usize) {
    if capacity == 0 {
        return (0, 0);
    }

    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(capacity / 2);
    let end = (start + capacity).min(len);

    if end - start.min(end) < capacity && len >= capacity {
        start = end.saturating_sub(capacity);
    }
    (start.min(end), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageAdapter};
    use crate::ui::viewmodel::NoticeLevel;

    fn state_with(books: &[(&str, bool)]) -> AppState {
        let mut controller = Controller::new(StorageAdapter::new(Box::new(MemoryStore::new())));
        controller.startup();
        for (title, done) in books {
            let mut form = BookForm::filled(*title, "Author", "2000", *done);
            controller.add(&mut form);
        }
        AppState::new(controller, Theme::default())
    }

    #[test]
    fn capacity_goes_to_the_shelf_that_needs_it() {
        assert_eq!(split_capacity(10, 2, 30), (2, 8));
        assert_eq!(split_capacity(10, 30, 1), (9, 1));
        assert_eq!(split_capacity(11, 30, 30), (5, 6));
        assert_eq!(split_capacity(0, 3, 3), (0, 0));
    }

    #[test]
    fn window_follows_selection() {
        assert_eq!(visible_window(3, Some(2), 10), (0, 3));
        assert_eq!(visible_window(20, Some(10), 4), (8, 12));
        assert_eq!(visible_window(20, Some(19), 4), (16, 20));
        assert_eq!(visible_window(20, None, 4), (0, 4));
        assert_eq!(visible_window(5, Some(2), 0), (0, 0));
    }

    #[test]
    fn selection_wraps_within_focused_shelf() {
        let mut state = state_with(&[("A", false), ("B", false), ("C", true)]);

        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);

        state.switch_shelf();
        assert_eq!(state.focus, ShelfFocus::Complete);
        assert_eq!(state.selected_index, 0);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn viewmodel_splits_shelves_and_marks_selection() {
        let state = state_with(&[("Dune", false), ("Emma", true)]);
        let vm = state.compute_viewmodel(30, 100);

        assert!(vm.empty_state.is_none());
        assert_eq!(vm.shelves[0].title, "Not yet read (1)");
        assert_eq!(vm.shelves[1].title, "Finished reading (1)");
        assert!(vm.shelves[0].rows[0].is_selected);
        assert!(!vm.shelves[1].rows[0].is_selected);
        assert_eq!(vm.shelves[0].rows[0].action, "Mark complete");
        assert_eq!(vm.shelves[1].rows[0].action, "Mark incomplete");
        assert_eq!(vm.header.title, " Bookshelf: 2 books, 1 finished ");
    }

    #[test]
    fn empty_shelf_has_empty_state() {
        let state = state_with(&[]);
        let vm = state.compute_viewmodel(30, 100);

        assert!(vm.shelves.is_empty());
        assert_eq!(vm.empty_state.unwrap().message, "Your bookshelf is empty");
    }

    #[test]
    fn search_view_highlights_matches() {
        let mut state = state_with(&[("The Hobbit", false), ("Dune", false)]);
        state.controller.search("hob");

        let vm = state.compute_viewmodel(30, 100);
        assert!(vm.header.title.contains("\"hob\""));
        assert_eq!(vm.shelves[0].rows.len(), 1);
        assert_eq!(vm.shelves[0].rows[0].highlight_ranges, vec![(4, 7)]);

        state.controller.search("zzz");
        let vm = state.compute_viewmodel(30, 100);
        assert_eq!(vm.empty_state.unwrap().subtitle, "Esc: show all books");
    }

    #[test]
    fn small_terminal_windows_long_shelves() {
        let titles: Vec<String> = (0..40).map(|i| format!("Book {i:02}")).collect();
        let books: Vec<(&str, bool)> = titles.iter().map(|t| (t.as_str(), false)).collect();
        let mut state = state_with(&books);
        state.selected_index = 39;

        let vm = state.compute_viewmodel(20, 80);
        let panel = &vm.shelves[0];
        assert_eq!(panel.rows.len(), 10);
        assert_eq!(panel.hidden_above, 30);
        assert_eq!(panel.hidden_below, 0);
        assert!(panel.rows.last().unwrap().is_selected);
    }

    #[test]
    fn form_mode_shows_fields_and_hides_selection() {
        let mut state = state_with(&[("Dune", false)]);
        state.input_mode = InputMode::Form(FormField::Author);
        state.form.title = "Emma".into();

        let vm = state.compute_viewmodel(30, 100);
        let form = vm.form.unwrap();
        assert_eq!(form.fields.len(), 4);
        assert_eq!(form.fields[0].value, "Emma");
        assert!(form.fields[1].is_focused);
        assert!(!vm.shelves[0].rows[0].is_selected);
    }

    #[test]
    fn outcome_notice_is_shown_until_next_intent() {
        let mut state = state_with(&[("Dune", false)]);
        let id = state.selected_book_id().unwrap();

        let outcome = state.controller.toggle(id);
        state.apply_outcome(&outcome);
        let vm = state.compute_viewmodel(30, 100);
        assert_eq!(vm.notice.unwrap().level, NoticeLevel::Info);

        state.apply_outcome(&Outcome::default());
        assert!(state.notice.is_none());
    }

    #[test]
    fn long_titles_are_truncated_with_clipped_highlights() {
        let long = "An Extraordinarily Long Title About Hobbits And Their Adventures";
        let mut state = state_with(&[(long, false)]);
        state.controller.search("adventures");

        let vm = state.compute_viewmodel(30, 60);
        let row = &vm.shelves[0].rows[0];
        assert!(row.title.ends_with("..."));
        assert!(row.highlight_ranges.iter().all(|&(_, end)| end <= row.title.chars().count() - 3));
    }
}
