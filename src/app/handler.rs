//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and
//! plugin lifecycle events, translating them into controller intents, state
//! changes, and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime, already mapped from raw keys
//! 2. [`handle_event`] pattern-matches the event against the input mode
//! 3. Intents run on the controller; their outcome updates the notice
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Startup`, `PermissionDenied`
//! - **Navigation**: `KeyDown`, `KeyUp`, `SwitchShelf`
//! - **Intents**: `ToggleSelected`, `DeleteSelected`, `Submit`, `ShowAll`
//! - **Input**: `Char`, `Backspace`, `NextField`, `PrevField`, `Cancel`
//! - **Mode Switching**: `OpenForm`, `SearchMode`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{handle_event, AppState, Controller, Event};
//! use bookshelf::storage::{MemoryStore, StorageAdapter};
//! use bookshelf::ui::Theme;
//!
//! let controller = Controller::new(StorageAdapter::new(Box::new(MemoryStore::new())));
//! let mut state = AppState::new(controller, Theme::default());
//!
//! let (should_render, actions) = handle_event(&mut state, &Event::Startup);
//! assert!(should_render);
//! assert!(actions.is_empty());
//! ```

use crate::app::controller::Notice;
use crate::app::modes::{FormField, InputMode};
use crate::app::{Action, AppState};

/// Events triggered by user input or the plugin lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Storage access was granted; load and render the shelf.
    Startup,
    /// Storage access was refused; start with an empty, unsaved shelf.
    PermissionDenied,

    /// Moves selection down by one position (wraps to top).
    KeyDown,
    /// Moves selection up by one position (wraps to bottom).
    KeyUp,
    /// Moves selection to the other shelf.
    SwitchShelf,

    /// Flips the selected book between the shelves.
    ToggleSelected,
    /// Deletes the selected book.
    DeleteSelected,

    /// Opens the add form.
    OpenForm,
    /// Starts typing a search keyword.
    SearchMode,
    /// Leaves a search result view.
    ShowAll,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Types a character into the form field or search query.
    Char(char),
    /// Removes the last character of the form field or search query.
    Backspace,
    /// Focuses the next form field.
    NextField,
    /// Focuses the previous form field.
    PrevField,
    /// Submits the form or runs the search.
    Submit,
    /// Leaves the form or search box.
    Cancel,
}

/// Processes an event, mutates application state, and returns what to do next.
///
/// # Returns
///
/// `(should_render, actions)`: whether the screen is stale, and side effects
/// for the plugin runtime to execute in order.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event.
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event, mode = ?state.input_mode)
        .entered();

    match (state.input_mode, *event) {
        (_, Event::Startup) => {
            let outcome = state.controller.startup();
            state.apply_outcome(&outcome);
            state.reset_selection();
            (true, vec![])
        }
        (_, Event::PermissionDenied) => {
            tracing::warn!("filesystem permission denied");
            let outcome = state.controller.startup();
            state.apply_outcome(&outcome);
            state.reset_selection();
            state.notice = Some(Notice::Warning(
                "Filesystem access denied; changes will not be saved".to_string(),
            ));
            (true, vec![])
        }
        (_, Event::CloseFocus) => (false, vec![Action::CloseFocus]),

        (InputMode::Browse, Event::KeyDown) => {
            state.move_selection_down();
            (true, vec![])
        }
        (InputMode::Browse, Event::KeyUp) => {
            state.move_selection_up();
            (true, vec![])
        }
        (InputMode::Browse, Event::SwitchShelf) => {
            state.switch_shelf();
            (true, vec![])
        }
        (InputMode::Browse, Event::ToggleSelected) => {
            let Some(id) = state.selected_book_id() else {
                tracing::debug!("no book selected");
                return (false, vec![]);
            };
            let outcome = state.controller.toggle(id);
            state.apply_outcome(&outcome);
            (true, vec![])
        }
        (InputMode::Browse, Event::DeleteSelected) => {
            let Some(id) = state.selected_book_id() else {
                tracing::debug!("no book selected");
                return (false, vec![]);
            };
            let outcome = state.controller.delete(id);
            state.apply_outcome(&outcome);
            (true, vec![])
        }
        (InputMode::Browse, Event::OpenForm) => {
            tracing::debug!("opening add form");
            state.input_mode = InputMode::Form(FormField::Title);
            (true, vec![])
        }
        (InputMode::Browse, Event::SearchMode) => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            state.search_query.clear();
            (true, vec![])
        }
        (InputMode::Browse, Event::ShowAll) => {
            if state.view().is_search() {
                let outcome = state.controller.show_all();
                state.apply_outcome(&outcome);
                state.reset_selection();
            } else {
                state.notice = None;
            }
            (true, vec![])
        }

        (InputMode::Form(field), Event::Char(c)) => {
            match state.form.text_mut(field) {
                Some(buffer) => buffer.push(c),
                None if c == ' ' || c == 'x' => state.form.is_complete = !state.form.is_complete,
                None => return (false, vec![]),
            }
            (true, vec![])
        }
        (InputMode::Form(field), Event::Backspace) => {
            let Some(buffer) = state.form.text_mut(field) else {
                return (false, vec![]);
            };
            buffer.pop();
            (true, vec![])
        }
        (InputMode::Form(field), Event::NextField) => {
            state.input_mode = InputMode::Form(field.next());
            (true, vec![])
        }
        (InputMode::Form(field), Event::PrevField) => {
            state.input_mode = InputMode::Form(field.prev());
            (true, vec![])
        }
        (InputMode::Form(_), Event::Submit) => {
            let outcome = state.controller.add(&mut state.form);
            state.apply_outcome(&outcome);

            if outcome.rendered {
                state.input_mode = InputMode::Browse;
                if let Some(id) = state.controller.repository().books().last().map(|b| b.id) {
                    state.select_book(id);
                }
            }
            (true, vec![])
        }
        (InputMode::Form(_), Event::Cancel) => {
            tracing::debug!("add form cancelled");
            state.input_mode = InputMode::Browse;
            (true, vec![])
        }

        (InputMode::Search, Event::Char(c)) => {
            state.search_query.push(c);
            tracing::trace!(query = %state.search_query, "search query updated");
            (true, vec![])
        }
        (InputMode::Search, Event::Backspace) => {
            state.search_query.pop();
            (true, vec![])
        }
        (InputMode::Search, Event::Submit) => {
            let outcome = state.controller.search(&state.search_query);
            state.apply_outcome(&outcome);

            if outcome.rendered {
                state.input_mode = InputMode::Browse;
                state.reset_selection();
            }
            (true, vec![])
        }
        (InputMode::Search, Event::Cancel) => {
            tracing::debug!(query = %state.search_query, "search cancelled");
            state.input_mode = InputMode::Browse;
            state.search_query.clear();
            (true, vec![])
        }

        (mode, event) => {
            tracing::trace!(?mode, ?event, "event ignored in this mode");
            (false, vec![])
        }
    }
}
