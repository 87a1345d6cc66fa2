//! Input mode state types for the application.
//!
//! These enums decide how key presses are interpreted and which parts of the
//! screen are shown.
//!
//! # State Machine
//!
//! ```text
//!            a                    Enter (added) / Esc
//!   Browse ─────▶ Form(field) ───────────────────────▶ Browse
//!     │ ▲
//!   / │ │ Enter (searched) / Esc
//!     ▼ │
//!    Search
//! ```

/// Input of the add form that currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Author,
    Year,
    /// The "finished reading" checkbox.
    Complete,
}

impl FormField {
    /// Fields in on-screen order.
    pub const ALL: [Self; 4] = [Self::Title, Self::Author, Self::Year, Self::Complete];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Year => "Year",
            Self::Complete => "Finished",
        }
    }

    /// Next field, wrapping to the first.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Year,
            Self::Year => Self::Complete,
            Self::Complete => Self::Title,
        }
    }

    /// Previous field, wrapping to the last.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Complete,
            Self::Author => Self::Title,
            Self::Year => Self::Author,
            Self::Complete => Self::Year,
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigating the shelves.
    ///
    /// Available keybindings: j/k (move), Tab (switch shelf), Enter/Space
    /// (toggle), d (delete), a (add), / (search), Esc (show all), q (quit).
    Browse,

    /// Filling in the add form, with the focused field.
    Form(FormField),

    /// Typing a title keyword.
    Search,
}

/// Shelf holding the keyboard selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShelfFocus {
    #[default]
    Incomplete,
    Complete,
}

impl ShelfFocus {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Incomplete => Self::Complete,
            Self::Complete => Self::Incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_cycle_is_consistent() {
        for field in FormField::ALL {
            assert_eq!(field.next().prev(), field);
        }
        assert_eq!(FormField::Complete.next(), FormField::Title);
    }
}
