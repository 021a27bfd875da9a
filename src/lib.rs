//! Storekeeper: A Zellij plugin for browsing and managing store records.
//!
//! Storekeeper is a terminal multiplexer plugin that provides:
//! - A paginated, searchable listing of store records
//! - A detail card for every stored field of a record
//! - Add and edit forms with field-level validation
//! - An in-memory repository behind a trait seam, standing in for a remote API
//! - Asynchronous store operations via Zellij worker threads
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Form state and validation                        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Repository  │   │ - Async CRUD  │
//! │ - Theming     │   │   trait       │   │ - Latency sim │
//! │ - Components  │   │ - In-memory   │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Store model, pagination (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (Store, pagination, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: Repository trait and in-memory backend
//! - [`worker`]: Background worker for async store operations
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing with file export
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/storekeeper.wasm" {
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`):
//!    - Parse configuration from Zellij
//!    - Initialize tracing (optional)
//!    - Create `AppState` with theme
//!    - Subscribe to Zellij events
//!    - Post the initial `ListStores` message to the worker
//!
//! 2. **Worker Processing**:
//!    - Filter and paginate the repository
//!    - Sleep for the simulated backend latency
//!    - Send the response back to the plugin thread
//!
//! 3. **UI Rendering**:
//!    - Compute the view model from state
//!    - Render the active screen (list, detail, form)
//!    - Handle user input (j/k/Enter/a/e//q)
//!
//! # Examples
//!
//! ```rust
//! use storekeeper::{Config, initialize, handle_event, Event};
//!
//! let config = Config {
//!     theme_name: Some("catppuccin-mocha".to_string()),
//!     ..Default::default()
//! };
//!
//! let mut state = initialize(&config);
//!
//! let events = vec![Event::KeyDown, Event::Select];
//! for event in events {
//!     let (_rendered, _actions) = handle_event(&mut state, &event)?;
//!     // Execute actions...
//! }
//! # Ok::<(), storekeeper::StorekeeperError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Repository Trait Seam
//!
//! The worker talks to storage through the [`storage::StoreRepository`] trait:
//! - The in-memory backend seeds three sample stores
//! - A future HTTP or file backend replaces it without touching the worker
//!
//! ## Worker-Based Operations
//!
//! Store operations run in a separate Zellij worker thread:
//! - Keeps the UI responsive during the simulated backend latency
//! - Exercises the pending/fulfilled/rejected states a real backend would
//! - Uses IPC messaging for result communication
//!
//! ## Immutable View Models
//!
//! UI rendering uses computed view models:
//! - Clear separation between state and display
//! - Enables easier testing and validation
//! - Pre-computes expensive operations (search match highlighting)
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Route};
pub use domain::{Result, Store, StorekeeperError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/storekeeper.wasm" {
///     theme "catppuccin-mocha"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. Absent keys leave their option unset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use storekeeper::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self {
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Creates a new `AppState` with the loaded theme (from file, name, or
/// default) and an empty store listing, populated by the first worker
/// response.
///
/// # Theme Resolution
///
/// 1. `theme_file` if set and loadable
/// 2. `theme_name` if set and recognized
/// 3. Default: Catppuccin Mocha
///
/// Load failures fall back to the default theme and are logged rather than
/// surfaced, so a typo in the configuration never blanks the UI.
///
/// # Example
///
/// ```rust
/// use storekeeper::{Config, initialize};
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// // State is ready for event processing
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing storekeeper plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file.clone()).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }

    #[test]
    fn named_theme_is_selected() {
        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-frappe");
    }
}
