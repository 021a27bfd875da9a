//! Empty state component renderer.
//!
//! This module renders the empty state message displayed when the listing has
//! no rows to show.

use crate::ui::helpers::render_centered_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message.
///
/// Displays a centered two-line message distinguishing an empty dataset
/// ("No stores yet") from a search with no matches.
///
/// # Parameters
///
/// * `row` - Starting row for the message block (1-indexed)
/// * `empty` - Empty state information (message and subtitle)
/// * `theme` - Active color theme
/// * `cols` - Terminal width in columns
///
/// The message uses the `empty_state_fg` theme color and the subtitle uses
/// `text_dim`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    render_centered_line(row, &empty.message, &theme.colors.empty_state_fg, cols);
    print!("{}", Theme::dim());
    render_centered_line(row + 1, &empty.subtitle, &theme.colors.text_dim, cols);
}
