//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with shelf totals
//! - [`search`]: Search input box
//! - [`form`]: Add-book form box
//! - [`shelf`]: One shelf as a table (TITLE, AUTHOR, YEAR, ACTION)
//! - [`empty`]: Message shown instead of the shelves
//! - [`notice`]: Latest saved/warning/error message
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines | Form - 6 lines]   (mode dependent)
//! [Unread shelf]
//! [Finished shelf]                          (or the empty state)
//! [Blank padding to fill screen]
//! [Notice]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod form;
mod header;
mod notice;
mod search;
mod shelf;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use header::render_header;
use notice::render_notice;
use search::render_search_bar;
use shelf::render_shelf;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen for a view model.
///
/// # Line Accounting
///
/// Reserves 6 lines for fixed chrome (blank, header, border, notice, border,
/// footer), plus the search bar or form when open. The view model's shelf
/// windows were already sized to fit what remains.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    if let Some(form) = &vm.form {
        current_row = render_form(current_row, form, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        for panel in &vm.shelves {
            current_row = render_shelf(current_row, panel, &vm.columns, theme, cols);
        }
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let notice_row = border_row.saturating_sub(1);

    if let Some(notice) = &vm.notice {
        render_notice(notice_row, notice, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
