//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used by several components: cursor positioning, search
//! match highlighting with ANSI escapes, and width-aware truncation. All text
//! handling works on character indices, never byte indices.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::ui::helpers::{substring_ranges, truncate};
//!
//! assert_eq!(substring_ranges("The Hobbit", "hob"), vec![(4, 7)]);
//! assert_eq!(truncate("The Silmarillion", 8), "The S...");
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges for search matches.
///
/// Highlighted sections use the match highlight colors; selected rows skip
/// highlighting so the selection background stays uniform.
///
/// # Parameters
///
/// * `text` - The text to render
/// * `ranges` - Character index ranges `(start, end)`, exclusive end, ascending
/// * `theme` - Active color theme for highlight colors
/// * `base_fg` - Color restored after each highlighted section
/// * `is_selected` - Whether the row is currently selected
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base_fg: &str,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len()).max(start);
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(base_fg));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Shortens `text` to at most `width` characters, ending in "..." when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }

    let mut out: String = text.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

/// Character ranges where `keyword` occurs in `text`, ignoring case.
///
/// Matches are non-overlapping and found left to right. Returns no ranges
/// when lowercasing would change the character count of `text`, since the
/// indices could then no longer be mapped back.
#[must_use]
pub fn substring_ranges(text: &str, keyword: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = keyword.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    if haystack.len() != text.chars().count() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        if haystack[pos..pos + needle.len()] == needle[..] {
            ranges.push((pos, pos + needle.len()));
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_character_width() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("Dune", 4), "Dune");
        assert_eq!(truncate("Cien años de soledad", 9), "Cien a...");
        assert_eq!(truncate("Dune", 2), "Du");
    }

    #[test]
    fn ranges_are_case_insensitive_and_non_overlapping() {
        assert_eq!(substring_ranges("Aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert_eq!(substring_ranges("Harry Potter", "  POT "), vec![(6, 9)]);
        assert!(substring_ranges("Dune", "").is_empty());
        assert!(substring_ranges("Dune", "xyz").is_empty());
    }

    #[test]
    fn ranges_use_character_indices() {
        assert_eq!(substring_ranges("Éléments d'été", "été"), vec![(11, 14)]);
    }
}
