//! Add-form component renderer.
//!
//! Draws a bordered box with one labelled line per field, in the same frame
//! style as the search bar.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormInfo;

/// Horizontal margin for the form box.
const FORM_BOX_MARGIN: usize = 5;

/// Width reserved for field labels.
const LABEL_WIDTH: usize = 10;

/// Renders the add form at `row`.
///
/// # Layout
///
/// ```text
/// [margin] ┌─ Add a book ──────────┐ [margin]
/// [margin] │   Title     Dune_     │ [margin]
/// [margin] │   Author              │ [margin]
/// [margin] │   Year                │ [margin]
/// [margin] │   Finished  [ ]       │ [margin]
/// [margin] └───────────────────────┘ [margin]
/// ```
///
/// The focused field is marked with `›` and a trailing cursor.
///
/// # Returns
///
/// The next available row position (`row + fields + 2`).
pub fn render_form(row: usize, form: &FormInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(FORM_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(FORM_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    let caption = " Add a book ";
    position_cursor(row, 1);
    print!("{margin}{border}┌─");
    print!("{}", Theme::bold());
    print!("{caption}");
    print!("{}", Theme::reset());
    print!("{border}");
    print!("{}┐", "─".repeat(inner_width.saturating_sub(caption.len() + 1)));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for field in &form.fields {
        let marker = if field.is_focused { " › " } else { "   " };
        let cursor = if field.is_focused && field.is_text { "_" } else { "" };
        let value_width = inner_width.saturating_sub(LABEL_WIDTH + marker.chars().count() + 1);
        let value = truncate(&format!("{}{cursor}", field.value), value_width);
        let line = format!("{marker}{:<lw$}{value}", field.label, lw = LABEL_WIDTH);
        let padding = inner_width.saturating_sub(line.chars().count());

        position_cursor(current_row, 1);
        print!("{margin}{border}│");
        if field.is_focused {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.header_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{line}");
        print!("{}", " ".repeat(padding));
        print!("{}", Theme::reset());
        print!("{border}│");
        print!("{}", Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{margin}{border}└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    current_row + 1
}
