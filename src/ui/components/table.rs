//! Table component renderer.
//!
//! This module renders the store listing as a three-column table with NAME,
//! ALIAS, and LOCATION columns. It supports selection highlighting and search
//! match highlighting on the name column.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StoreRow;

/// Fixed width of the NAME column, including the separating gap.
const NAME_COL_WIDTH: usize = 30;

/// Fixed width of the ALIAS column, including the separating gap.
const ALIAS_COL_WIDTH: usize = 26;

/// Renders the table column headers at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:<name_w$}{:<alias_w$}{}",
        "NAME",
        "ALIAS",
        "LOCATION",
        name_w = NAME_COL_WIDTH,
        alias_w = ALIAS_COL_WIDTH,
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// # Returns
///
/// The next available row position (row + number of rows)
pub fn render_table_rows(row: usize, items: &[StoreRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single table row at the specified row position.
///
/// Displays one store with:
/// - NAME column (fixed width, left-aligned, search matches highlighted)
/// - ALIAS column (fixed width, left-aligned)
/// - LOCATION column (formatted coordinates, remaining width)
/// - Selection highlighting (full row background)
///
/// The row is padded to fill the entire terminal width so the selection
/// background renders as a solid bar.
fn render_table_row(row: usize, item: &StoreRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let name_len = item.name.chars().count();
    if item.highlight_ranges.is_empty() {
        print!("{}", item.name);
    } else {
        helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    }
    print!("{}", " ".repeat(NAME_COL_WIDTH.saturating_sub(name_len)));

    let alias_len = item.alias.chars().count();
    print!("{}", item.alias);
    print!("{}", " ".repeat(ALIAS_COL_WIDTH.saturating_sub(alias_len)));

    print!("{}", item.location);

    let line_len = NAME_COL_WIDTH.max(name_len)
        + ALIAS_COL_WIDTH.max(alias_len)
        + item.location.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
