//! Shelf component renderer.
//!
//! Renders one shelf as a titled four-column table (TITLE, AUTHOR, YEAR,
//! ACTION) with selection and search match highlighting.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnLayout, DisplayItem, ShelfPanel};

/// Renders a shelf panel starting at `row`.
///
/// # Layout
///
/// ```text
/// ▸ Not yet read (12)                       ↑ 3 more  ↓ 1 more
/// TITLE            AUTHOR           YEAR    ACTION
/// Dune             Frank Herbert    1965    Mark complete
/// ```
///
/// # Returns
///
/// The next available row position.
pub fn render_shelf(
    row: usize,
    panel: &ShelfPanel,
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = render_shelf_title(row, panel, theme, cols);
    current_row = render_column_headers(current_row, columns, theme);
    for item in &panel.rows {
        current_row = render_book_row(current_row, item, columns, theme, cols, panel.is_complete);
    }
    current_row
}

fn render_shelf_title(row: usize, panel: &ShelfPanel, theme: &Theme, cols: usize) -> usize {
    let marker = if panel.is_focused { "▸ " } else { "  " };
    let title = format!("{marker}{}", panel.title);

    let mut more = String::new();
    if panel.hidden_above > 0 {
        more.push_str(&format!("↑ {} more  ", panel.hidden_above));
    }
    if panel.hidden_below > 0 {
        more.push_str(&format!("↓ {} more  ", panel.hidden_below));
    }

    let title_len = title.chars().count();
    let more_len = more.chars().count();

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    if panel.is_complete {
        print!("{}", Theme::fg(&theme.colors.complete_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.header_fg));
    }
    print!("{title}");
    print!("{}", Theme::reset());

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(cols.saturating_sub(title_len + more_len)));
    print!("{more}");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the column headers using the shared column widths.
fn render_column_headers(row: usize, columns: &ColumnLayout, theme: &Theme) -> usize {
    let gap = " ".repeat(ColumnLayout::GAP);

    position_cursor(row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(
        "{:<tw$}{gap}{:<aw$}{gap}{:<yw$}{gap}{}",
        "TITLE",
        "AUTHOR",
        "YEAR",
        "ACTION",
        tw = columns.title,
        aw = columns.author,
        yw = columns.year,
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a single book row.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Search match highlights (unless selected)
/// 3. Shelf text color
///
/// The row is padded to the full terminal width so the selection background
/// covers the whole line.
fn render_book_row(
    row: usize,
    item: &DisplayItem,
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
    is_complete_shelf: bool,
) -> usize {
    let base_fg = if is_complete_shelf {
        &theme.colors.complete_fg
    } else {
        &theme.colors.text_normal
    };

    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(base_fg));
    }

    helpers::render_highlighted_text(
        &item.title,
        &item.highlight_ranges,
        theme,
        base_fg,
        item.is_selected,
    );
    let title_len = item.title.chars().count();
    print!("{}", " ".repeat(columns.title.saturating_sub(title_len) + ColumnLayout::GAP));

    let gap = " ".repeat(ColumnLayout::GAP);
    print!(
        "{:<aw$}{gap}{:<yw$}{gap}{:<acw$}",
        item.author,
        item.year,
        item.action,
        aw = columns.author,
        yw = columns.year,
        acw = columns.action,
    );

    let line_len = columns.title + columns.author + columns.year + columns.action + 3 * ColumnLayout::GAP;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
