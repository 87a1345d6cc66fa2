//! Empty state component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message where the shelves would be.
///
/// Shown when the collection is empty, or when a search matched nothing. The
/// message uses `empty_state_fg`; the subtitle is dimmed.
///
/// # Layout
///
/// ```text
/// [blank line]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// # Returns
///
/// The next available row position.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let message_row = row + 1;
    render_centered(message_row, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    render_centered(message_row + 1, &empty.subtitle, &subtitle_style, cols);

    message_row + 2
}

fn render_centered(row: usize, text: &str, style: &str, cols: usize) {
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
