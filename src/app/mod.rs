//! Application layer coordinating state, events, and intents.
//!
//! This module sits between the plugin runtime (main.rs) and the
//! domain/storage/ui layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Key → Event → handle_event → Controller intent → Outcome → AppState → Actions
//!                                   │
//!                                   ├─ BookRepository   (mutate)
//!                                   ├─ ViewSynchronizer (render)
//!                                   └─ StorageAdapter   (save)
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: User intents wired to repository, view, and storage
//! - [`form`]: Add-form input buffer and validation
//! - [`handler`]: Event processing and mode transitions
//! - [`modes`]: Input mode state machine types
//! - [`state`]: Application state container and view model computation

pub mod actions;
pub mod controller;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::{Controller, Notice, Outcome};
pub use form::BookForm;
pub use handler::{handle_event, Event};
pub use modes::{FormField, InputMode, ShelfFocus};
pub use state::AppState;
