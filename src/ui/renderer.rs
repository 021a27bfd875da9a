//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components. It dispatches on the screen
//! variant (list, detail, form) computed from the current route.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the layout function for the screen

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ScreenViewModel, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and delegates to the layout
/// function for the active screen.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Terminal height in rows
/// * `cols` - Terminal width in columns
///
/// # Output
///
/// Prints ANSI-styled output to stdout using `print!` macros. Does not clear
/// the screen or manage cursor position beyond explicit positioning.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a pre-computed view model.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.screen {
        ScreenViewModel::List(list) => {
            components::render_list_screen(vm, list, theme, cols, rows);
        }
        ScreenViewModel::Detail(detail) => {
            components::render_detail_screen(vm, detail, theme, cols, rows);
        }
        ScreenViewModel::Form(form) => {
            components::render_form_screen(vm, form, theme, cols, rows);
        }
    }
}
