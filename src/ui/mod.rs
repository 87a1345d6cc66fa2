//! User interface layer: shelf projection and terminal rendering.
//!
//! # Architecture
//!
//! ```text
//! Book collection → ViewSynchronizer → ShelfView
//!                                         │
//! AppState ─── compute_viewmodel ─────────┴──▶ UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`synchronizer`]: Splits books into the two rendered shelves
//! - [`viewmodel`]: Shelf entries and screen layout types
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod synchronizer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use synchronizer::{partition, ViewSynchronizer};
pub use theme::Theme;
pub use viewmodel::{BookEntry, ShelfView, UIViewModel, ViewScope};
