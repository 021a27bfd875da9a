//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with methods for selection management and UI view model generation.
//! It serves as the single source of truth for all transient UI state.
//!
//! # Architecture
//!
//! `AppState` mirrors the three-state lifecycle of every store operation: a
//! dispatch sets `loading` and clears `error` (pending), a success response
//! clears `loading` and applies its payload (fulfilled), and a failure response
//! clears `loading` and records the message (rejected). View models are
//! computed on demand from state snapshots.
//!
//! # State Components
//!
//! - **Stores**: The currently displayed page of store records
//! - **Current store**: The record backing the detail and edit screens
//! - **Pagination / search**: Listing position and committed filter
//! - **Route / input mode**: Navigation target and keybinding interpretation
//! - **Form**: Editable buffer for the add and edit screens

use super::form::{FormField, FormState};
use super::modes::{InputMode, Route};
use crate::domain::{Pagination, Store};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailViewModel, EmptyState, FieldRow, FooterInfo, FormViewModel, HeaderInfo, ListViewModel,
    PaginationInfo, ScreenViewModel, SearchBarInfo, StoreCard, StoreRow, UIViewModel,
};

/// Central application state container.
///
/// Holds all transient UI state including the displayed store page, the
/// current detail record, operation status, and navigation. Mutated by the
/// event handler in response to user input and worker responses.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The page of stores currently displayed in the list.
    ///
    /// Replaced wholesale by list responses. A fulfilled create prepends its
    /// record here without refetching.
    pub stores: Vec<Store>,

    /// The store backing the detail and edit screens.
    ///
    /// Set by single-record responses, cleared when navigating away from the
    /// detail screen so stale data is never shown on re-entry.
    pub current_store: Option<Store>,

    /// Whether a store operation is in flight.
    pub loading: bool,

    /// Message from the most recent failed operation.
    ///
    /// Cleared whenever a new operation is dispatched.
    pub error: Option<String>,

    /// Pagination descriptor for the displayed listing.
    pub pagination: Pagination,

    /// The committed search filter applied to list requests.
    pub search_query: String,

    /// The search text being typed, committed on Enter.
    pub search_draft: String,

    /// Zero-based index of the selected row within `stores`.
    pub selected_index: usize,

    /// Current navigation target.
    pub route: Route,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Editable buffer for the add and edit screens.
    pub form: FormState,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a new application state showing an empty list.
    ///
    /// The first page of stores is requested by the plugin shim right after
    /// initialization, so the initial state renders as loading.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            stores: vec![],
            current_store: None,
            loading: false,
            error: None,
            pagination: Pagination::default(),
            search_query: String::new(),
            search_draft: String::new(),
            selected_index: 0,
            route: Route::List,
            input_mode: InputMode::Normal,
            form: FormState::default(),
            theme,
        }
    }

    /// Moves selection cursor down by one row, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.stores.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.stores.len();
    }

    /// Moves selection cursor up by one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.stores.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.stores.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Returns a reference to the currently selected store, if any.
    #[must_use]
    pub fn selected_store(&self) -> Option<&Store> {
        self.stores.get(self.selected_index)
    }

    /// Marks an operation as dispatched.
    ///
    /// The pending half of every operation: raises the loading flag and clears
    /// any stale error.
    pub fn begin_operation(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// Transforms application state into a structured representation optimized
    /// for rendering: one of the three screen variants plus header and footer
    /// chrome.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let screen = match &self.route {
            Route::List => ScreenViewModel::List(self.compute_list_screen(rows)),
            Route::Detail { .. } => ScreenViewModel::Detail(self.compute_detail_screen()),
            Route::AddForm => ScreenViewModel::Form(self.compute_form_screen("Add Store")),
            Route::EditForm { .. } => ScreenViewModel::Form(self.compute_form_screen("Edit Store")),
        };

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            screen,
        }
    }

    fn compute_list_screen(&self, rows: usize) -> ListViewModel {
        let available_rows = self.calculate_available_rows(rows);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.stores.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.stores.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let store_rows: Vec<StoreRow> = self.stores[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, store)| {
                let absolute_idx = visible_start + relative_idx;
                StoreRow {
                    name: store.name.clone(),
                    alias: store.alias.clone(),
                    location: format!("{:.4}, {:.4}", store.latitude, store.longitude),
                    is_selected: absolute_idx == self.selected_index,
                    highlight_ranges: compute_highlight_ranges(&store.name, &self.search_query),
                }
            })
            .collect();

        let empty_state = if !self.loading && self.error.is_none() && store_rows.is_empty() {
            Some(if self.search_query.is_empty() {
                EmptyState {
                    message: "No stores yet".to_string(),
                    subtitle: "Press 'a' to add your first store".to_string(),
                }
            } else {
                EmptyState {
                    message: format!("No stores match \"{}\"", self.search_query),
                    subtitle: "Press '/' to change the search".to_string(),
                }
            })
        } else {
            None
        };

        let search_bar = if self.input_mode == InputMode::Search {
            Some(SearchBarInfo {
                query: self.search_draft.clone(),
                editing: true,
            })
        } else if self.search_query.is_empty() {
            None
        } else {
            Some(SearchBarInfo {
                query: self.search_query.clone(),
                editing: false,
            })
        };

        ListViewModel {
            rows: store_rows,
            selected_index: self.selected_index.saturating_sub(visible_start),
            search_bar,
            pagination: PaginationInfo {
                current_page: self.pagination.current_page,
                total_pages: self.pagination.total_pages,
                total_items: self.pagination.total_items,
                prev_enabled: self.pagination.has_prev() && !self.loading,
                next_enabled: self.pagination.has_next() && !self.loading,
            },
            loading: self.loading,
            error: self.error.clone(),
            empty_state,
        }
    }

    fn compute_detail_screen(&self) -> DetailViewModel {
        if self.loading {
            return DetailViewModel::Loading;
        }
        if let Some(error) = &self.error {
            return DetailViewModel::Error(error.clone());
        }
        self.current_store.as_ref().map_or(
            // transient gap between navigation and the fetch response
            DetailViewModel::Loading,
            |store| {
                DetailViewModel::Loaded(StoreCard {
                    id: store.id.clone(),
                    name: store.name.clone(),
                    alias: store.alias.clone(),
                    description: store.description.clone(),
                    coordinates: format!("{:.6}, {:.6}", store.latitude, store.longitude),
                    address: store.address.clone(),
                    image: store.image.clone(),
                    thumbnail: store.thumbnail.clone(),
                    created: format_created_date(&store.created_at),
                })
            },
        )
    }

    fn compute_form_screen(&self, title: &str) -> FormViewModel {
        let fields = FormField::ALL
            .iter()
            .map(|field| FieldRow {
                label: field.label(),
                value: self.form.value(*field).to_string(),
                is_focused: self.form.focused == Some(*field),
                error: self.form.errors.get(field).cloned(),
            })
            .collect();

        FormViewModel {
            title: title.to_string(),
            fields,
            submitting: self.loading,
            error: self.error.clone(),
        }
    }

    /// Computes header information based on the current route.
    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.route {
            Route::List => format!(" Stores ({}) ", self.pagination.total_items),
            Route::Detail { .. } => " Store Detail ".to_string(),
            Route::AddForm => " Add Store ".to_string(),
            Route::EditForm { .. } => " Edit Store ".to_string(),
        };
        HeaderInfo { title }
    }

    /// Computes footer keybindings text based on current route and input mode.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.route, self.input_mode) {
            (Route::List, InputMode::Search) => {
                "Enter: apply  ESC: cancel  Type to edit query".to_string()
            }
            (Route::List, _) => {
                "j/k: navigate  h/l: pages  Enter: open  /: search  a: add  e: edit  r: refresh  q: quit"
                    .to_string()
            }
            (Route::Detail { .. }, _) => "e: edit  r: retry  ESC: back".to_string(),
            (Route::AddForm | Route::EditForm { .. }, _) => {
                "Tab: next field  Ctrl+g: alias from name  Enter: save  ESC: cancel".to_string()
            }
        };

        FooterInfo { keybindings }
    }

    /// Calculates rows available for the store table after subtracting UI chrome.
    ///
    /// Accounts for the header block, table headers, pagination bar, footer,
    /// and the search box when it is visible.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Search => total_rows.saturating_sub(10),
            _ => total_rows.saturating_sub(7),
        }
    }
}

/// Computes character ranges of the query inside the text, case-insensitively.
///
/// Returns non-overlapping `(start, end)` character index ranges (exclusive
/// end) for every occurrence. Comparison is ASCII case-insensitive, which
/// matches the repository's filter for the data this plugin displays.
#[must_use]
pub fn compute_highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }

    let hay: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();
    let needle: Vec<char> = query.chars().map(|c| c.to_ascii_lowercase()).collect();

    if needle.len() > hay.len() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        if hay[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Formats an RFC 3339 creation timestamp for display.
///
/// Falls back to the raw string if parsing fails.
fn format_created_date(created_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(created_at).map_or_else(
        |_| created_at.to_string(),
        |dt| dt.format("%b %-d, %Y").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repository::StoreRepository;

    #[test]
    fn highlight_ranges_are_case_insensitive_and_non_overlapping() {
        assert_eq!(compute_highlight_ranges("Coffee Corner", "co"), vec![(0, 2), (7, 9)]);
        assert_eq!(compute_highlight_ranges("Coffee Corner", "COFFEE"), vec![(0, 6)]);
        assert!(compute_highlight_ranges("Coffee Corner", "tea").is_empty());
        assert!(compute_highlight_ranges("Coffee Corner", "").is_empty());
    }

    #[test]
    fn created_date_formats_rfc3339() {
        assert_eq!(format_created_date("2024-01-15T10:00:00Z"), "Jan 15, 2024");
        assert_eq!(format_created_date("not a date"), "not a date");
    }

    #[test]
    fn selection_wraps_around_the_page() {
        let mut state = AppState::new(Theme::default());
        state.stores = crate::storage::MemoryRepository::seeded().list("").unwrap();

        assert_eq!(state.selected_index, 0);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn empty_list_distinguishes_no_data_from_no_matches() {
        let mut state = AppState::new(Theme::default());

        let vm = state.compute_viewmodel(24, 80);
        let ScreenViewModel::List(list) = vm.screen else {
            panic!("expected list screen");
        };
        assert_eq!(list.empty_state.unwrap().message, "No stores yet");

        state.search_query = "pharmacy".to_string();
        let vm = state.compute_viewmodel(24, 80);
        let ScreenViewModel::List(list) = vm.screen else {
            panic!("expected list screen");
        };
        assert_eq!(
            list.empty_state.unwrap().message,
            "No stores match \"pharmacy\""
        );
    }

    #[test]
    fn loading_suppresses_the_empty_state_and_disables_paging() {
        let mut state = AppState::new(Theme::default());
        state.pagination = Pagination::for_page(2, 25);
        state.begin_operation();

        let vm = state.compute_viewmodel(24, 80);
        let ScreenViewModel::List(list) = vm.screen else {
            panic!("expected list screen");
        };
        assert!(list.loading);
        assert!(list.empty_state.is_none());
        assert!(!list.pagination.prev_enabled);
        assert!(!list.pagination.next_enabled);
    }

    #[test]
    fn detail_screen_reflects_operation_state() {
        let mut state = AppState::new(Theme::default());
        state.route = Route::Detail { id: "3".to_string() };

        state.begin_operation();
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.screen, ScreenViewModel::Detail(DetailViewModel::Loading)));

        state.loading = false;
        state.error = Some("Store not found".to_string());
        let vm = state.compute_viewmodel(24, 80);
        let ScreenViewModel::Detail(DetailViewModel::Error(message)) = vm.screen else {
            panic!("expected detail error");
        };
        assert_eq!(message, "Store not found");
    }
}
