//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component is
//! responsible for rendering a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar with screen name and record count
//! - [`footer`]: Help text and keybinding hints
//! - [`search`]: Search input box (border, query text, cursor)
//! - [`table`]: Store list with columns (NAME, ALIAS, LOCATION)
//! - [`pagination`]: Page position and prev/next hints
//! - [`detail`]: Full card for one store
//! - [`form`]: Add and edit field editor
//! - [`empty`]: Empty state message for a listing with no rows
//!
//! # Layout Modes
//!
//! The module provides one high-level layout function per screen:
//!
//! - [`render_list_screen`]: Header + optional search box + table + pagination + footer
//! - [`render_detail_screen`]: Header + store card + footer
//! - [`render_form_screen`]: Header + field editor + footer

mod detail;
mod empty;
mod footer;
mod form;
mod header;
mod pagination;
mod search;
mod table;

use crate::ui::helpers::{position_cursor, render_centered_line};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailViewModel, FormViewModel, ListViewModel, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/body, body/footer).
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

/// Renders the bottom chrome shared by every screen.
///
/// Draws a border above the footer and the footer itself on the last two
/// usable rows.
fn render_bottom_chrome(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Renders the store listing screen.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search box - 3 lines, only while editing or filtered]
/// [Table headers]
/// [Table rows | loading line | error lines | empty state]
/// [Blank padding to fill screen]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
pub fn render_list_screen(
    vm: &UIViewModel,
    list: &ListViewModel,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = 2; // skip the blank line at row 1

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &list.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    current_row = render_table_headers(current_row, theme);

    if list.loading {
        render_centered_line(current_row + 1, "Loading stores...", &theme.colors.accent_fg, cols);
    } else if let Some(error) = &list.error {
        render_centered_line(current_row + 1, error, &theme.colors.error_fg, cols);
        render_centered_line(
            current_row + 2,
            "Press 'r' to retry",
            &theme.colors.text_dim,
            cols,
        );
    } else if let Some(empty) = &list.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        render_table_rows(current_row, &list.rows, theme, cols);
    }

    let pagination_row = rows.saturating_sub(3);
    render_pagination(pagination_row, &list.pagination, theme, cols);

    render_bottom_chrome(vm, theme, cols, rows);
}

/// Renders the store detail screen.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Store card | loading line | error lines]
/// [Blank padding to fill screen]
/// [Border]
/// [Footer]
/// ```
pub fn render_detail_screen(
    vm: &UIViewModel,
    detail: &DetailViewModel,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    render_detail(current_row + 1, detail, theme, cols);

    render_bottom_chrome(vm, theme, cols, rows);
}

/// Renders the add or edit form screen.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Field rows with inline validation messages]
/// [Saving line | submission error]
/// [Blank padding to fill screen]
/// [Border]
/// [Footer]
/// ```
pub fn render_form_screen(
    vm: &UIViewModel,
    form: &FormViewModel,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    render_form(current_row + 1, form, theme, cols);

    render_bottom_chrome(vm, theme, cols, rows);
}
