//! Pagination bar component renderer.
//!
//! This module renders the listing's pagination line: page position, record
//! count, and prev/next hints that dim when the corresponding direction is
//! unavailable.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders the pagination bar at the specified row.
///
/// # Layout
///
/// ```text
///  ‹ h   Page 2/3 · 25 stores   l ›
/// ```
///
/// The directional hints use the normal text color while enabled and the dim
/// color when that direction has no page, matching how the reducer ignores
/// the keys.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_pagination(
    row: usize,
    pagination: &PaginationInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let prev_hint = "‹ h";
    let next_hint = "l ›";
    let middle = format!(
        "Page {}/{} · {} stores",
        pagination.current_page, pagination.total_pages, pagination.total_items
    );

    // 3 spaces of breathing room on each side of the middle section
    let text_len = prev_hint.chars().count() + next_hint.chars().count() + middle.chars().count() + 6;
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));

    let prev_color = if pagination.prev_enabled {
        &theme.colors.text_normal
    } else {
        &theme.colors.text_dim
    };
    print!("{}{prev_hint}{}", Theme::fg(prev_color), Theme::reset());

    print!("   ");
    print!("{}{middle}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    print!("   ");

    let next_color = if pagination.next_enabled {
        &theme.colors.text_normal
    } else {
        &theme.colors.text_dim
    };
    print!("{}{next_hint}{}", Theme::fg(next_color), Theme::reset());

    row + 1
}
