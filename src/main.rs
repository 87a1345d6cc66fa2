//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the bookshelf library
//! and the Zellij plugin system. It implements `ZellijPlugin` to translate
//! host events into library events and library actions into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key` and `PermissionRequestResult` events
//! 3. **Startup**: Once permission is answered, load the saved shelf
//! 4. **Update**: Map keys per input mode, delegate to the library layer
//! 5. **Render**: Call library render function
//!
//! # Keybindings
//!
//! Browsing the shelves:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `Tab`/`h`/`l`/`Left`/`Right`: Switch shelf
//! - `Enter`/`Space`: Move the selected book to the other shelf
//! - `d`: Delete the selected book
//! - `a`: Open the add form
//! - `/`: Search by title
//! - `Esc`: Show all books again
//! - `q`: Close plugin
//!
//! In the add form:
//! - `Tab`/`Down`: Next field, `Shift+Tab`/`Up`: Previous field
//! - `Space`/`x`: Tick the finished checkbox
//! - `Enter`: Add the book
//! - `Esc`: Back to the shelves, keeping what was typed
//!
//! In search mode:
//! - Any character: Type into the keyword
//! - `Enter`: Run the search
//! - `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookshelf::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: bookshelf::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookshelf::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, installs tracing, builds application state,
    /// requests filesystem access, and subscribes to events. The shelf is
    /// loaded later, when the permission result arrives.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookshelf::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = bookshelf::initialize(&config);

        request_permission(&[PermissionType::FullHdAccess]);
        subscribe(&[EventType::Key, EventType::PermissionRequestResult]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - loading bookshelf");
                    Event::Startup
                }
                PermissionStatus::Denied => Event::PermissionDenied,
            },
            _ => return false,
        };

        let (should_render, actions) = handle_event(&mut self.app, &our_event);
        tracing::debug!(
            action_count = actions.len(),
            should_render = should_render,
            "event handled"
        );
        for action in actions {
            Self::execute_action(action);
        }
        should_render
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookshelf::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Maps keyboard events to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        match self.app.input_mode {
            InputMode::Browse => Self::map_browse_key(key),
            InputMode::Form(_) => Self::map_form_key(key),
            InputMode::Search => Self::map_search_key(key),
        }
    }

    fn map_browse_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Tab
            | BareKey::Left
            | BareKey::Right
            | BareKey::Char('h' | 'l') => Event::SwitchShelf,
            BareKey::Enter | BareKey::Char(' ') => Event::ToggleSelected,
            BareKey::Char('d') => Event::DeleteSelected,
            BareKey::Char('a') => Event::OpenForm,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Esc => Event::ShowAll,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PrevField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PrevField,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Cancel,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Cancel,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
