//! Form component renderer.
//!
//! This module renders the add and edit screens: one line per field with a
//! focus marker and block cursor, validation messages inline under their
//! fields, and a status line while a submission is in flight.

use crate::ui::helpers::{position_cursor, render_centered_line};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FieldRow, FormViewModel};

/// Left margin for the form body.
const FORM_MARGIN: usize = 3;

/// Width of the label column.
const LABEL_WIDTH: usize = 14;

/// Renders the form screen body at the specified row.
///
/// # Layout
///
/// ```text
/// ▸ Name          Coffee Corner█
///   Alias         coffee-corner
///   Latitude      veryfast
///     Latitude must be a number between -90 and 90
///   ...
/// ```
///
/// # Returns
///
/// The next available row position
pub fn render_form(row: usize, form: &FormViewModel, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for field in &form.fields {
        current_row = render_field_row(current_row, field, theme);
        if let Some(error) = &field.error {
            current_row = render_field_error(current_row, error, theme);
        }
    }

    current_row += 1;

    if form.submitting {
        render_centered_line(current_row, "Saving...", &theme.colors.accent_fg, cols);
        current_row += 1;
    } else if let Some(error) = &form.error {
        render_centered_line(current_row, error, &theme.colors.error_fg, cols);
        current_row += 1;
    }

    current_row
}

/// Renders one editable field line with its focus marker.
fn render_field_row(row: usize, field: &FieldRow, theme: &Theme) -> usize {
    position_cursor(row, FORM_MARGIN);

    if field.is_focused {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
        print!("▸ ");
    } else {
        print!("  ");
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{:<LABEL_WIDTH$}", field.label);

    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", field.value);
    if field.is_focused {
        print!("█");
    }

    print!("{}", Theme::reset());
    row + 1
}

/// Renders a validation message under its field.
fn render_field_error(row: usize, error: &str, theme: &Theme) -> usize {
    position_cursor(row, FORM_MARGIN + 4);
    print!("{}", Theme::fg(&theme.colors.error_fg));
    print!("{error}");
    print!("{}", Theme::reset());
    row + 1
}
