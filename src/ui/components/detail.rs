//! Detail card component renderer.
//!
//! This module renders the full card for one store: every stored field laid
//! out as labeled lines, plus the loading and error states of the fetch behind
//! the screen.

use crate::ui::helpers::{position_cursor, render_centered_line};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailViewModel, StoreCard};

/// Left margin for the card body.
const CARD_MARGIN: usize = 3;

/// Width of the label column.
const LABEL_WIDTH: usize = 14;

/// Renders the detail screen body at the specified row.
///
/// Loading and error states replace the card with a centered status line; the
/// error line is followed by a retry hint.
///
/// # Returns
///
/// The next available row position
pub fn render_detail(row: usize, detail: &DetailViewModel, theme: &Theme, cols: usize) -> usize {
    match detail {
        DetailViewModel::Loading => {
            render_centered_line(row + 2, "Loading store...", &theme.colors.accent_fg, cols);
            row + 3
        }

        DetailViewModel::Error(message) => {
            render_centered_line(row + 2, message, &theme.colors.error_fg, cols);
            print!("{}", Theme::dim());
            render_centered_line(row + 3, "Press 'r' to retry", &theme.colors.text_dim, cols);
            row + 4
        }

        DetailViewModel::Loaded(card) => render_card(row, card, theme),
    }
}

/// Renders the labeled field lines of a loaded store card.
fn render_card(row: usize, card: &StoreCard, theme: &Theme) -> usize {
    let mut current_row = row;

    current_row = render_title_line(current_row, card, theme);
    current_row += 1; // blank line under the title

    current_row = render_field(current_row, "Description", &card.description, theme);
    current_row = render_field(current_row, "Coordinates", &card.coordinates, theme);
    if let Some(address) = &card.address {
        current_row = render_field(current_row, "Address", address, theme);
    }
    current_row = render_field(current_row, "Image", &card.image, theme);
    current_row = render_field(current_row, "Thumbnail", &card.thumbnail, theme);
    current_row = render_field(current_row, "Created", &card.created, theme);

    render_field(current_row, "Id", &card.id, theme)
}

/// Renders the bold store name with its alias alongside.
fn render_title_line(row: usize, card: &StoreCard, theme: &Theme) -> usize {
    position_cursor(row, CARD_MARGIN);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", card.name);
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("  ({})", card.alias);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a single "Label  value" line.
fn render_field(row: usize, label: &str, value: &str, theme: &Theme) -> usize {
    position_cursor(row, CARD_MARGIN);
    print!("{}", Theme::fg(&theme.colors.accent_fg));
    print!("{label:<LABEL_WIDTH$}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{value}");
    print!("{}", Theme::reset());
    row + 1
}
