//! Notice line renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{NoticeInfo, NoticeLevel};

/// Renders the latest notice on one line, colored by severity.
///
/// Errors and warnings get a short prefix so they stay distinguishable on
/// terminals without true color.
pub fn render_notice(row: usize, notice: &NoticeInfo, theme: &Theme, cols: usize) -> usize {
    let prefix = match notice.level {
        NoticeLevel::Info => "",
        NoticeLevel::Warning => "Warning: ",
        NoticeLevel::Error => "Error: ",
    };
    let text = truncate(&format!(" {prefix}{}", notice.message), cols);

    position_cursor(row, 1);
    if notice.level == NoticeLevel::Error {
        print!("{}", Theme::bold());
    }
    print!("{}", Theme::fg(theme.colors.notice_fg(notice.level)));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}
