//! Event handling and state transitions.
//!
//! This module is the single reducer for the plugin. Every keystroke and every
//! worker response is translated into an [`Event`] by the plugin shim and fed
//! through [`handle_event`], which mutates [`AppState`] and returns the side
//! effects to execute.
//!
//! # Operation lifecycle
//!
//! Asynchronous store operations move through three phases here:
//!
//! 1. **Pending**: the event that starts an operation raises `loading`, clears
//!    `error`, and emits a [`Action::PostToWorker`].
//! 2. **Fulfilled**: the matching success response clears `loading` and applies
//!    its payload to state.
//! 3. **Rejected**: [`WorkerResponse::Error`] clears `loading` and records the
//!    message for display.

use super::actions::Action;
use super::form::FormState;
use super::modes::{InputMode, Route};
use super::state::AppState;
use crate::domain::{Pagination, Result};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events that drive state transitions.
///
/// Produced by the plugin shim from raw key events (already resolved against
/// the current input mode) and from deserialized worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Move the list selection down one row.
    KeyDown,

    /// Move the list selection up one row.
    KeyUp,

    /// Load the previous page of the listing.
    PrevPage,

    /// Load the next page of the listing.
    NextPage,

    /// Open the detail screen for the selected store.
    Select,

    /// Open the creation form.
    OpenAddForm,

    /// Open the edit form for the selected or displayed store.
    OpenEditForm,

    /// Enter search input mode on the list screen.
    SearchMode,

    /// Commit the search draft and reload page one.
    CommitSearch,

    /// Leave search input mode, discarding the draft.
    ExitSearch,

    /// A printable character for the search draft or the focused form field.
    Char(char),

    /// Delete the last character of the search draft or focused form field.
    Backspace,

    /// Navigate one level up (detail to list, form to its origin).
    Back,

    /// Re-dispatch the operation behind the current screen.
    Retry,

    /// Move form focus to the next field.
    NextField,

    /// Move form focus to the previous field.
    PrevField,

    /// Fill the alias field from the current name.
    GenerateAlias,

    /// Validate the form and submit it to the worker.
    SubmitForm,

    /// Close the plugin pane.
    CloseFocus,

    /// A response arrived from the worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event and updates application state.
///
/// Returns a tuple of `(should_render, actions)` where `should_render`
/// indicates whether the UI needs to be redrawn and `actions` contains side
/// effects for the plugin runtime to execute.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    tracing::debug!(event = ?event, "handling event");

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }

        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }

        Event::PrevPage => Ok(handle_page_change(state, -1)),

        Event::NextPage => Ok(handle_page_change(state, 1)),

        Event::Select => Ok(handle_select(state)),

        Event::OpenAddForm => {
            state.route = Route::AddForm;
            state.input_mode = InputMode::Form;
            state.form = FormState::empty();
            state.error = None;
            Ok((true, vec![]))
        }

        Event::OpenEditForm => Ok(handle_open_edit_form(state)),

        Event::SearchMode => {
            if state.route == Route::List {
                state.input_mode = InputMode::Search;
                state.search_draft = state.search_query.clone();
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }

        Event::CommitSearch => {
            state.input_mode = InputMode::Normal;
            state.search_query = state.search_draft.clone();
            state.selected_index = 0;
            state.begin_operation();
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::list_stores(
                    1,
                    state.search_query.clone(),
                ))],
            ))
        }

        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            state.search_draft.clear();
            Ok((true, vec![]))
        }

        Event::Char(c) => {
            match state.input_mode {
                InputMode::Search => state.search_draft.push(*c),
                InputMode::Form => state.form.push_char(*c),
                InputMode::Normal => return Ok((false, vec![])),
            }
            Ok((true, vec![]))
        }

        Event::Backspace => {
            match state.input_mode {
                InputMode::Search => {
                    state.search_draft.pop();
                }
                InputMode::Form => state.form.pop_char(),
                InputMode::Normal => return Ok((false, vec![])),
            }
            Ok((true, vec![]))
        }

        Event::Back => Ok(handle_back(state)),

        Event::Retry => Ok(handle_retry(state)),

        Event::NextField => {
            state.form.focus_next();
            Ok((true, vec![]))
        }

        Event::PrevField => {
            state.form.focus_prev();
            Ok((true, vec![]))
        }

        Event::GenerateAlias => {
            state.form.generate_alias();
            Ok((true, vec![]))
        }

        Event::SubmitForm => Ok(handle_submit_form(state)),

        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

/// Moves the listing one page in either direction.
///
/// Ignored while an operation is in flight or when the target page does not
/// exist.
fn handle_page_change(state: &mut AppState, delta: isize) -> (bool, Vec<Action>) {
    if state.route != Route::List || state.loading {
        return (false, vec![]);
    }

    let target = if delta < 0 {
        if !state.pagination.has_prev() {
            return (false, vec![]);
        }
        state.pagination.current_page - 1
    } else {
        if !state.pagination.has_next() {
            return (false, vec![]);
        }
        state.pagination.current_page + 1
    };

    state.selected_index = 0;
    state.begin_operation();
    (
        true,
        vec![Action::PostToWorker(WorkerMessage::list_stores(
            target,
            state.search_query.clone(),
        ))],
    )
}

/// Opens the detail screen for the selected store and fetches it.
fn handle_select(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.route != Route::List {
        return (false, vec![]);
    }
    let Some(store) = state.selected_store() else {
        return (false, vec![]);
    };

    let id = store.id.clone();
    state.route = Route::Detail { id: id.clone() };
    state.current_store = None;
    state.begin_operation();
    (
        true,
        vec![Action::PostToWorker(WorkerMessage::get_store(id))],
    )
}

/// Opens the edit form for the selected or displayed store.
///
/// The form is pre-filled from the record already in memory and refreshed from
/// the backend, so edits always start from current data.
fn handle_open_edit_form(state: &mut AppState) -> (bool, Vec<Action>) {
    let store = match &state.route {
        Route::List => state.selected_store().cloned(),
        Route::Detail { .. } => state.current_store.clone(),
        _ => None,
    };
    let Some(store) = store else {
        return (false, vec![]);
    };

    state.route = Route::EditForm {
        id: store.id.clone(),
    };
    state.input_mode = InputMode::Form;
    state.form = FormState::from_store(&store);
    state.begin_operation();
    (
        true,
        vec![Action::PostToWorker(WorkerMessage::get_store(store.id))],
    )
}

/// Navigates one level up from the current screen.
fn handle_back(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.route.clone() {
        Route::List => (false, vec![]),

        Route::Detail { .. } => {
            state.route = Route::List;
            state.current_store = None;
            state.error = None;
            (true, vec![])
        }

        Route::AddForm => {
            state.route = Route::List;
            state.input_mode = InputMode::Normal;
            state.error = None;
            (true, vec![])
        }

        Route::EditForm { id } => {
            state.route = Route::Detail { id };
            state.input_mode = InputMode::Normal;
            state.error = None;
            (true, vec![])
        }
    }
}

/// Re-dispatches the operation behind the current screen.
///
/// On the list this reloads the current page with the committed search; on the
/// detail screen it refetches the displayed store.
fn handle_retry(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.route.clone() {
        Route::List => {
            state.begin_operation();
            (
                true,
                vec![Action::PostToWorker(WorkerMessage::list_stores(
                    state.pagination.current_page,
                    state.search_query.clone(),
                ))],
            )
        }

        Route::Detail { id } => {
            state.begin_operation();
            (
                true,
                vec![Action::PostToWorker(WorkerMessage::get_store(id))],
            )
        }

        _ => (false, vec![]),
    }
}

/// Validates the form and submits it as a create or update.
///
/// A form that fails validation stays on screen with its error map populated
/// and nothing is dispatched.
fn handle_submit_form(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.loading {
        return (false, vec![]);
    }

    match state.route.clone() {
        Route::AddForm => {
            let Some(draft) = state.form.validated_draft() else {
                return (true, vec![]);
            };
            state.begin_operation();
            (
                true,
                vec![Action::PostToWorker(WorkerMessage::create_store(draft))],
            )
        }

        Route::EditForm { id } => {
            let Some(patch) = state.form.validated_patch() else {
                return (true, vec![]);
            };
            state.begin_operation();
            (
                true,
                vec![Action::PostToWorker(WorkerMessage::update_store(id, patch))],
            )
        }

        _ => (false, vec![]),
    }
}

/// Applies a worker response to state.
///
/// Every response ends an in-flight operation, so the loading flag is cleared
/// unconditionally before the payload is applied.
fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    state.loading = false;

    match response {
        WorkerResponse::StoresLoaded { stores, pagination } => {
            state.stores = stores.clone();
            state.pagination = pagination.clone();
            state.error = None;
            if state.selected_index >= state.stores.len() {
                state.selected_index = state.stores.len().saturating_sub(1);
            }
        }

        WorkerResponse::StoreLoaded { store } => {
            state.error = None;
            // refresh the edit form when the fetch is for the record under edit
            if let Route::EditForm { id } = &state.route {
                if *id == store.id {
                    state.form = FormState::from_store(store);
                }
            }
            state.current_store = Some(store.clone());
        }

        WorkerResponse::StoreCreated { store } => {
            state.error = None;
            state.stores.insert(0, store.clone());
            state.pagination = Pagination::for_page(
                state.pagination.current_page.max(1),
                state.pagination.total_items + 1,
            );
            state.route = Route::List;
            state.input_mode = InputMode::Normal;
            state.selected_index = 0;
            state.form = FormState::default();
        }

        WorkerResponse::StoreUpdated { store } => {
            state.error = None;
            if let Some(existing) = state.stores.iter_mut().find(|s| s.id == store.id) {
                *existing = store.clone();
            }
            if state
                .current_store
                .as_ref()
                .is_some_and(|current| current.id == store.id)
            {
                state.current_store = Some(store.clone());
            }
            if let Route::EditForm { id } = state.route.clone() {
                if id == store.id {
                    state.current_store = Some(store.clone());
                    state.route = Route::Detail { id };
                    state.input_mode = InputMode::Normal;
                }
            }
        }

        WorkerResponse::Error { message } => {
            state.error = Some(message.clone());
        }
    }

    (true, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryRepository, StoreRepository};
    use crate::ui::theme::Theme;
    use crate::worker::StorekeeperWorker;

    fn seeded_state() -> AppState {
        let mut state = AppState::new(Theme::default());
        let stores = MemoryRepository::seeded().list("").unwrap();
        state.pagination = Pagination::for_page(1, stores.len());
        state.stores = stores;
        state
    }

    /// Feeds every `PostToWorker` action through a latency-free worker and
    /// loops the responses back into the reducer, like the plugin runtime does.
    fn pump(state: &mut AppState, worker: &mut StorekeeperWorker, event: &Event) {
        let (_, actions) = handle_event(state, event).unwrap();
        for action in actions {
            if let Action::PostToWorker(message) = action {
                let response = worker.handle_message(message);
                let (_, follow_ups) =
                    handle_event(state, &Event::WorkerResponse(response)).unwrap();
                assert!(follow_ups.is_empty());
            }
        }
    }

    #[test]
    fn list_dispatch_sets_pending_and_response_fulfills() {
        let mut state = seeded_state();
        state.pagination = Pagination::for_page(1, 25);

        let (rendered, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(rendered);
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(matches!(
            actions[..],
            [Action::PostToWorker(WorkerMessage::ListStores { page: 2, .. })]
        ));

        let response = WorkerResponse::StoresLoaded {
            stores: vec![],
            pagination: Pagination::for_page(2, 25),
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(!state.loading);
        assert_eq!(state.pagination.current_page, 2);
    }

    #[test]
    fn error_response_rejects_the_operation() {
        let mut state = seeded_state();
        state.begin_operation();

        let response = WorkerResponse::Error {
            message: "Store not found".to_string(),
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Store not found"));
    }

    #[test]
    fn page_change_is_ignored_while_loading_or_out_of_range() {
        let mut state = seeded_state();

        // single page, nowhere to go
        let (rendered, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!rendered);
        assert!(actions.is_empty());

        state.pagination = Pagination::for_page(1, 25);
        state.begin_operation();
        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn select_opens_detail_and_fetches_the_store() {
        let mut state = seeded_state();
        state.selected_index = 2;

        let (_, actions) = handle_event(&mut state, &Event::Select).unwrap();
        assert_eq!(state.route, Route::Detail { id: "3".to_string() });
        assert!(state.loading);
        assert!(state.current_store.is_none());
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::GetStore { id, .. })] if id == "3"
        ));
    }

    #[test]
    fn back_from_detail_clears_the_current_store() {
        let mut state = seeded_state();
        let mut worker = StorekeeperWorker::without_latency(Box::new(MemoryRepository::seeded()));

        pump(&mut state, &mut worker, &Event::Select);
        assert!(state.current_store.is_some());

        handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(state.route, Route::List);
        assert!(state.current_store.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn commit_search_reloads_page_one_with_the_query() {
        let mut state = seeded_state();
        state.pagination = Pagination::for_page(3, 25);
        state.selected_index = 4;

        handle_event(&mut state, &Event::SearchMode).unwrap();
        assert_eq!(state.input_mode, InputMode::Search);
        for c in "coffee".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }

        let (_, actions) = handle_event(&mut state, &Event::CommitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.search_query, "coffee");
        assert_eq!(state.selected_index, 0);
        assert!(state.loading);
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::ListStores { page: 1, search, .. })]
                if search == "coffee"
        ));
    }

    #[test]
    fn exit_search_discards_the_draft_but_keeps_the_committed_query() {
        let mut state = seeded_state();
        state.search_query = "coffee".to_string();

        handle_event(&mut state, &Event::SearchMode).unwrap();
        assert_eq!(state.search_draft, "coffee");
        handle_event(&mut state, &Event::Char('x')).unwrap();
        handle_event(&mut state, &Event::ExitSearch).unwrap();

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.search_query, "coffee");
    }

    #[test]
    fn retry_re_dispatches_the_operation_for_the_current_screen() {
        let mut state = seeded_state();
        state.pagination = Pagination::for_page(2, 25);
        state.search_query = "shop".to_string();
        state.error = Some("boom".to_string());

        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert!(state.error.is_none());
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::ListStores { page: 2, search, .. })]
                if search == "shop"
        ));

        state.loading = false;
        state.route = Route::Detail { id: "1".to_string() };
        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::GetStore { id, .. })] if id == "1"
        ));
    }

    #[test]
    fn invalid_form_submission_dispatches_nothing() {
        let mut state = seeded_state();
        handle_event(&mut state, &Event::OpenAddForm).unwrap();

        let (rendered, actions) = handle_event(&mut state, &Event::SubmitForm).unwrap();
        assert!(rendered);
        assert!(actions.is_empty());
        assert!(!state.loading);
        assert!(!state.form.errors.is_empty());
    }

    #[test]
    fn created_store_leads_the_list_and_navigation_returns_to_it() {
        let mut state = seeded_state();
        let mut worker = StorekeeperWorker::without_latency(Box::new(MemoryRepository::seeded()));

        handle_event(&mut state, &Event::OpenAddForm).unwrap();
        assert_eq!(state.route, Route::AddForm);
        assert_eq!(state.input_mode, InputMode::Form);

        state.form.name = "Test Shop".to_string();
        state.form.alias = "test-shop".to_string();
        state.form.description = "A brand new shop for the list".to_string();
        state.form.latitude = "45.5".to_string();
        state.form.longitude = "-73.6".to_string();
        state.form.image = "/test.png".to_string();

        pump(&mut state, &mut worker, &Event::SubmitForm);

        assert_eq!(state.route, Route::List);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(!state.loading);
        assert_eq!(state.stores[0].name, "Test Shop");
        assert_eq!(state.pagination.total_items, 4);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn updated_store_replaces_the_row_and_lands_on_detail() {
        let mut state = seeded_state();
        let mut worker = StorekeeperWorker::without_latency(Box::new(MemoryRepository::seeded()));

        state.selected_index = 2;
        pump(&mut state, &mut worker, &Event::OpenEditForm);
        assert_eq!(state.route, Route::EditForm { id: "3".to_string() });
        assert_eq!(state.form.name, "Coffee Corner");

        state.form.description = "Fresh beans roasted daily on site".to_string();
        pump(&mut state, &mut worker, &Event::SubmitForm);

        assert_eq!(state.route, Route::Detail { id: "3".to_string() });
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(
            state.current_store.as_ref().unwrap().description,
            "Fresh beans roasted daily on site"
        );
        assert_eq!(
            state.stores[2].description,
            "Fresh beans roasted daily on site"
        );
    }

    #[test]
    fn edit_form_refreshes_from_the_fetch_response() {
        let mut state = seeded_state();
        // the row in memory is stale compared to the backend
        state.stores[0].description = "stale description".to_string();

        let mut worker = StorekeeperWorker::without_latency(Box::new(MemoryRepository::seeded()));
        pump(&mut state, &mut worker, &Event::OpenEditForm);

        assert!(state.form.description.starts_with("Your one-stop shop"));
        assert_ne!(state.form.description, "stale description");
    }

    #[test]
    fn back_from_edit_returns_to_detail_and_from_add_to_list() {
        let mut state = seeded_state();

        handle_event(&mut state, &Event::OpenAddForm).unwrap();
        handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(state.route, Route::List);
        assert_eq!(state.input_mode, InputMode::Normal);

        state.route = Route::EditForm { id: "2".to_string() };
        state.input_mode = InputMode::Form;
        handle_event(&mut state, &Event::Back).unwrap();
        assert_eq!(state.route, Route::Detail { id: "2".to_string() });
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn close_focus_requests_the_pane_to_hide() {
        let mut state = seeded_state();
        let (rendered, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!rendered);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
