//! Search bar component renderer.
//!
//! A bordered one-line input for the title keyword.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at `row`.
///
/// # Layout
///
/// ```text
/// [margin] ┌───────────────────────┐ [margin]
/// [margin] │ Search title: hob_    │ [margin]
/// [margin] └───────────────────────┘ [margin]
/// ```
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let search_text = truncate(&format!(" Search title: {}_", search.query), inner_width);
    let padding = inner_width.saturating_sub(search_text.chars().count());

    position_cursor(row + 1, 1);
    print!("{margin}{border}│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{border}│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
