//! Route and input mode state types for the application.
//!
//! This module defines the state machine enums that control navigation and
//! input handling. The route determines which screen is rendered, while the
//! input mode determines how keystrokes are interpreted.
//!
//! # State Machine
//!
//! The application navigates between four routes:
//! - **List**: Paginated, searchable store table (the root screen)
//! - **Detail**: Full card for a single store
//! - **`AddForm`** / **`EditForm`**: Field-by-field editing
//!
//! Input modes control keybinding interpretation:
//! - **Normal**: Navigation and command keys
//! - **Search**: Keystrokes edit the search draft
//! - **Form**: Keystrokes edit the focused form field

/// Current navigation target determining which screen is rendered.
///
/// Routes that reference a store carry its id so the screen can be restored
/// after the backing data reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The paginated store listing (root screen).
    List,

    /// Detail card for one store.
    Detail {
        /// Id of the displayed store.
        id: String,
    },

    /// Creation form for a new store.
    AddForm,

    /// Edit form for an existing store.
    EditForm {
        /// Id of the store being edited.
        id: String,
    },
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how character input is routed.
/// Determines the displayed footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), h/l (pages), / (search),
    /// enter (open detail), a (add), e (edit), r (retry), q (quit).
    Normal,

    /// Search input mode on the list screen.
    ///
    /// Characters edit the local search draft. Enter commits the draft and
    /// reloads page one, Esc discards it.
    Search,

    /// Form editing mode on the add and edit screens.
    ///
    /// Characters edit the focused field. Tab/arrows move focus, Enter submits,
    /// Esc cancels.
    Form,
}
