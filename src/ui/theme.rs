//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the plugin, supporting both
//! built-in themes and custom themes loaded from TOML files. It provides
//! utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `bookshelf-dark`: Warm dark theme (default)
//! - `bookshelf-light`: Paper-toned light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e6d8c3"
//! selection_fg = "#1f1a17"
//! selection_bg = "#d9a55b"
//! text_normal = "#e6d8c3"
//! text_dim = "#8c7b6b"
//! border = "#5a4a40"
//! search_bar_border = "#d9a55b"
//! match_highlight_fg = "#1f1a17"
//! match_highlight_bg = "#e8c872"
//! empty_state_fg = "#9cb8c9"
//! complete_fg = "#8fbf7f"
//! notice_info_fg = "#8fbf7f"
//! notice_warning_fg = "#e8c872"
//! notice_error_fg = "#e07a6a"
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookshelf::ui::Theme;
//!
//! let theme = Theme::from_name("bookshelf-dark").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{BookshelfError, Result};
use crate::ui::viewmodel::NoticeLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "bookshelf-dark";

/// Color scheme configuration for UI rendering.
///
/// Contains theme metadata and color definitions. Can be loaded from built-in
/// themes or custom TOML files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#e6d8c3"). Optional fields
/// default to `None`, allowing themes to opt out of certain styling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar and form border color.
    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// Title color of the finished shelf.
    pub complete_fg: String,

    /// Notice colors by severity.
    pub notice_info_fg: String,
    pub notice_warning_fg: String,
    pub notice_error_fg: String,
}

impl ThemeColors {
    /// Foreground color for a notice of the given severity.
    #[must_use]
    pub fn notice_fg(&self, level: NoticeLevel) -> &str {
        match level {
            NoticeLevel::Info => &self.notice_info_fg,
            NoticeLevel::Warning => &self.notice_warning_fg,
            NoticeLevel::Error => &self.notice_error_fg,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `bookshelf-dark`, `bookshelf-light`.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "bookshelf-dark" => include_str!("../../themes/bookshelf-dark.toml"),
            "bookshelf-light" => include_str!("../../themes/bookshelf-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Theme`] if the file cannot be read or the
    /// TOML content cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| BookshelfError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| BookshelfError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookshelf::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (`bookshelf-dark`).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("Built-in bookshelf-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn built_in_themes_parse() {
        for name in ["bookshelf-dark", "bookshelf-light"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
        assert!(Theme::from_name("bookshelf-light").unwrap().colors.header_bg.is_none());
    }

    #[test]
    fn hex_parsing_falls_back_to_white() {
        assert_eq!(Theme::hex_to_rgb("#102030"), (16, 32, 48));
        assert_eq!(Theme::hex_to_rgb("nope"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("#zz0000"), (255, 0, 0));
    }

    #[test]
    fn theme_file_errors_are_theme_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name = \"broken\"").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(BookshelfError::Theme(_))));
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(BookshelfError::Theme(_))
        ));
    }

    #[test]
    fn custom_theme_file_loads() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(include_str!("../../themes/bookshelf-light.toml").as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.colors.notice_fg(NoticeLevel::Error), "#b03a2e");
    }
}
