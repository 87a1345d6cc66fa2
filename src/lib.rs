//! Bookshelf: a Zellij plugin for keeping track of the books you read.
//!
//! Bookshelf keeps a personal collection of books split into two shelves,
//! "not yet read" and "finished reading":
//! - Add books through a form (title, author, year, finished checkbox)
//! - Move books between shelves, delete them, search them by title
//! - Persist the whole collection as one JSON document after every change
//! - Reload it on the next start

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and input modes                   │
//! │  - Interaction controller (intents)                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Domain Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (domain/)     │
//! │ - Shelf sync  │   │ - Adapter     │   │ - Book model  │
//! │ - Rendering   │   │ - Key-value   │   │ - Repository  │
//! │ - Theming     │   │   media       │   │ - Errors      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure (infrastructure/)                   │
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine, controller, and event model
//! - [`domain`]: Book model, repository, id generation, errors
//! - [`infrastructure`]: Sandbox path utilities
//! - [`storage`]: Storage adapter over key-value media (file, memory)
//! - [`ui`]: Shelf projection and terminal rendering with theme support
//! - [`observability`]: JSON trace log with rotation
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookshelf.wasm" {
//!         data_dir "~/.local/share/bookshelf"
//!         theme "bookshelf-dark"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, install tracing,
//!    build `AppState` around a file-backed controller, request filesystem
//!    access.
//! 2. **Permission Result**: `Event::Startup` (or `Event::PermissionDenied`)
//!    probes storage, loads the saved shelf, and renders it.
//! 3. **Interaction**: keys become events; intents mutate, re-render, save.
//!
//! # Examples
//!
//! ```rust
//! use bookshelf::storage::{MemoryStore, StorageAdapter};
//! use bookshelf::{handle_event, AppState, Controller, Event, Theme};
//!
//! let controller = Controller::new(StorageAdapter::new(Box::new(MemoryStore::new())));
//! let mut state = AppState::new(controller, Theme::default());
//!
//! for event in [Event::Startup, Event::OpenForm, Event::Char('D'), Event::Cancel] {
//!     let (_should_render, _actions) = handle_event(&mut state, &event);
//! }
//! assert_eq!(state.form.title, "D");
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Controller, Event, InputMode};
pub use domain::{Book, BookId, BookshelfError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::{FileStore, StorageAdapter};

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/bookshelf.wasm" {
///     data_dir "~/Documents/bookshelf"
///     theme "bookshelf-light"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Directory for the stored shelf and trace log.
    ///
    /// A leading `~` refers to the host home directory. Default:
    /// `~/.local/share/zellij/bookshelf`
    pub data_dir: Option<String>,

    /// Built-in theme name to use.
    ///
    /// Options: `bookshelf-dark`, `bookshelf-light`. Ignored if `theme_file`
    /// is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any
    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "bookshelf-light".to_string());
    /// map.insert("data_dir".to_string(), "  ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("bookshelf-light"));
    /// assert_eq!(config.data_dir, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            data_dir: get("data_dir"),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Resolved data directory, with `~` mapped into the sandbox.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.as_deref().map_or_else(infrastructure::get_data_dir, |dir| {
            PathBuf::from(infrastructure::expand_tilde(dir))
        })
    }

    /// Theme from `theme_file`, else `theme`, else the default.
    ///
    /// A theme that fails to load is logged and replaced by the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the application state for the plugin.
///
/// The controller gets a file-backed storage adapter rooted at the configured
/// data directory. Nothing is read yet: loading happens on `Event::Startup`,
/// once filesystem access has been granted.
pub fn initialize(config: &Config) -> AppState {
    let data_dir = config.data_dir();
    tracing::debug!(data_dir = %data_dir.display(), "initializing bookshelf plugin");

    let storage = StorageAdapter::new(Box::new(FileStore::new(data_dir)));
    AppState::new(Controller::new(storage), config.load_theme())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_into_host_share() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.data_dir(), infrastructure::get_data_dir());
        assert_eq!(config.load_theme().name, "bookshelf-dark");
    }

    #[test]
    fn data_dir_expands_tilde() {
        let config = Config {
            data_dir: Some("~/books".into()),
            ..Config::default()
        };
        assert_eq!(config.data_dir(), PathBuf::from("/host/books"));
    }

    #[test]
    fn bad_theme_settings_fall_back_to_default() {
        let unknown = Config {
            theme_name: Some("neon".into()),
            ..Config::default()
        };
        assert_eq!(unknown.load_theme().name, "bookshelf-dark");

        let missing_file = Config {
            theme_name: Some("bookshelf-light".into()),
            theme_file: Some("/no/such/theme.toml".into()),
            ..Config::default()
        };
        assert_eq!(missing_file.load_theme().name, "bookshelf-dark");
    }

    #[test]
    fn initialize_starts_in_browse_mode_with_empty_view() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_string_lossy().into_owned()),
            theme_name: Some("bookshelf-light".into()),
            ..Config::default()
        };

        let state = initialize(&config);
        assert_eq!(state.input_mode, InputMode::Browse);
        assert!(state.view().is_empty());
        assert_eq!(state.theme.name, "bookshelf-light");
    }
}
