//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/storage/worker layers. It implements
//! the event-driven architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Editable form buffer and synchronous validation
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Route and input mode state machine types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use storekeeper::app::{AppState, Event, handle_event};
//! use storekeeper::ui::theme::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_rendered, _actions) = handle_event(&mut state, &Event::KeyDown)?;
//! # Ok::<(), storekeeper::domain::StorekeeperError>(())
//! ```

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::{FormField, FormState};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Route};
pub use state::AppState;
