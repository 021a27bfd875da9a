//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Storekeeper
//! library and the Zellij plugin system. It implements the `ZellijPlugin` and
//! `ZellijWorker` traits to handle Zellij events and lifecycle.
//!
//! # Architecture
//!
//! The plugin uses Zellij's worker thread support for background processing:
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ StorekeeperWorker│   │  ← Background processing
//! │  │ (worker thread)  │   │  ← Store repository operations
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key` and `CustomMessage` events
//! 3. **Initial Fetch**: Request the first page of stores from the worker
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Worker Communication
//!
//! Messages between plugin and worker use JSON serialization:
//!
//! - Plugin → Worker: [`WorkerMessage`] (`ListStores`, `GetStore`, etc.)
//! - Worker → Plugin: [`WorkerResponse`] (`StoresLoaded`, error details)
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `h`/`Left`: Previous page
//! - `l`/`Right`: Next page
//! - `Enter`: Open store detail
//! - `a`: Add a store
//! - `e`: Edit the selected store
//! - `r`: Retry the failed request
//! - `/`: Enter search mode
//! - `Esc`: Back to the previous screen
//! - `q`: Close plugin
//!
//! In search mode:
//! - Printable characters: Type into the query
//! - `Enter`: Commit the search
//! - `Esc`: Exit search
//!
//! In form mode:
//! - Printable characters: Type into the focused field
//! - `Tab`/`Down`: Next field
//! - `Up`: Previous field
//! - `Ctrl+g`: Generate alias from the name field
//! - `Enter`: Submit
//! - `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use storekeeper::worker::{StorekeeperWorker, WorkerMessage, WorkerResponse};
use storekeeper::{handle_event, Action, Config, Event, InputMode};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(StorekeeperWorker, storekeeper_worker, STOREKEEPER_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like worker
/// communication.
struct State {
    /// Core application state from library layer.
    app: storekeeper::app::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: storekeeper::initialize(&default_config),
            worker_name: "storekeeper".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Called once during plugin startup. Parses configuration, initializes
    /// application state, subscribes to events, and posts the initial listing
    /// request to the worker.
    ///
    /// # Tracing
    ///
    /// The entire load process is instrumented with OpenTelemetry spans.
    ///
    /// # Subscriptions
    ///
    /// - `Key`: Keyboard input
    /// - `CustomMessage`: Worker responses
    ///
    /// No Zellij permissions are needed: the repository lives inside the
    /// worker thread and the plugin never touches sessions or the host shell.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        storekeeper::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        self.app = storekeeper::initialize(&config);
        tracing::debug!("app state initialized");

        tracing::debug!("subscribing to events");
        subscribe(&[EventType::Key, EventType::CustomMessage]);

        tracing::debug!("requesting initial store listing");
        self.post_worker_message(&WorkerMessage::list_stores(1, String::new()));
        self.app.begin_operation();
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to `handle_event`,
    /// and executes resulting actions. Returns `true` if the UI should re-render.
    ///
    /// # Tracing
    ///
    /// Each event is traced with its type for observability.
    ///
    /// # Parameters
    ///
    /// * `event` - Zellij event to process
    ///
    /// # Returns
    ///
    /// - `true` if the plugin UI should re-render
    /// - `false` if the event was ignored or resulted in no state changes
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        tracing::debug!(event = %event_name, "processing event");

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    ///
    /// Delegates to the library's rendering layer.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in rows
    /// * `cols` - Terminal width in columns
    fn render(&mut self, rows: usize, cols: usize) {
        storekeeper::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// Interpretation depends on the current input mode: in search and form
    /// modes most printable keys become `Char` events, while in normal mode
    /// they carry navigation meaning.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }
        if key.bare_key == BareKey::Char('g')
            && key.has_modifiers(&[KeyModifier::Ctrl])
            && self.app.input_mode == InputMode::Form
        {
            return Some(Event::GenerateAlias);
        }

        Some(match key.bare_key {
            BareKey::Down => match self.app.input_mode {
                InputMode::Normal => Event::KeyDown,
                InputMode::Form => Event::NextField,
                InputMode::Search => return None,
            },
            BareKey::Up => match self.app.input_mode {
                InputMode::Normal => Event::KeyUp,
                InputMode::Form => Event::PrevField,
                InputMode::Search => return None,
            },
            BareKey::Char('j') => match self.app.input_mode {
                InputMode::Normal => Event::KeyDown,
                InputMode::Search | InputMode::Form => Event::Char('j'),
            },
            BareKey::Char('k') => match self.app.input_mode {
                InputMode::Normal => Event::KeyUp,
                InputMode::Search | InputMode::Form => Event::Char('k'),
            },
            BareKey::Left => match self.app.input_mode {
                InputMode::Normal => Event::PrevPage,
                InputMode::Search | InputMode::Form => return None,
            },
            BareKey::Right => match self.app.input_mode {
                InputMode::Normal => Event::NextPage,
                InputMode::Search | InputMode::Form => return None,
            },
            BareKey::Char('h') => match self.app.input_mode {
                InputMode::Normal => Event::PrevPage,
                InputMode::Search | InputMode::Form => Event::Char('h'),
            },
            BareKey::Char('l') => match self.app.input_mode {
                InputMode::Normal => Event::NextPage,
                InputMode::Search | InputMode::Form => Event::Char('l'),
            },
            BareKey::Enter => match self.app.input_mode {
                InputMode::Normal => Event::Select,
                InputMode::Search => Event::CommitSearch,
                InputMode::Form => Event::SubmitForm,
            },
            BareKey::Esc => match self.app.input_mode {
                InputMode::Search => Event::ExitSearch,
                InputMode::Normal | InputMode::Form => Event::Back,
            },
            BareKey::Tab if self.app.input_mode == InputMode::Form => Event::NextField,
            BareKey::Char('q') if self.app.input_mode == InputMode::Normal => Event::CloseFocus,
            BareKey::Char('/') if self.app.input_mode == InputMode::Normal => Event::SearchMode,
            BareKey::Char('a') if self.app.input_mode == InputMode::Normal => Event::OpenAddForm,
            BareKey::Char('e') if self.app.input_mode == InputMode::Normal => Event::OpenEditForm,
            BareKey::Char('r') if self.app.input_mode == InputMode::Normal => Event::Retry,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => match self.app.input_mode {
                InputMode::Search | InputMode::Form => Event::Char(c),
                InputMode::Normal => return None,
            },
            _ => return None,
        })
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => {
                    tracing::debug!(response = ?response, "worker response received");
                    Some(Event::WorkerResponse(response))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Posts a message to the worker thread.
    ///
    /// Serializes the message as JSON and sends via Zellij's IPC system.
    ///
    /// # Parameters
    ///
    /// * `message` - Worker message to send
    ///
    /// # Errors
    ///
    /// Logs serialization errors but does not propagate them.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Close plugin pane
    /// - `PostToWorker`: Send IPC message to worker thread
    ///
    /// # Parameters
    ///
    /// * `action` - Action to execute
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(ref message) => {
                tracing::debug!(message = ?message, "posting message to worker");
                self.post_worker_message(message);
            }
        }
    }
}
