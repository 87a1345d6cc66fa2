//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! Storage writes are not actions: they happen synchronously inside the
//! controller intent that caused them. What remains are requests only the
//! Zellij host can fulfil.

/// Commands executed by the plugin runtime after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    ///
    /// Sent when the user explicitly requests to exit the plugin (pressing 'q').
    CloseFocus,
}
