//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like highlight ranges, formatted
//! coordinates, and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data. The
//! [`ScreenViewModel`] enum mirrors the navigation routes: exactly one screen
//! variant is rendered per frame, framed by the shared header and footer.

/// Complete UI view model for rendering.
///
/// One of the three screen variants plus the header and footer chrome shared
/// by every screen.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title, record count).
    pub header: HeaderInfo,

    /// Footer information (keybinding hints).
    pub footer: FooterInfo,

    /// The screen to render this frame.
    pub screen: ScreenViewModel,
}

/// The screen rendered between header and footer.
#[derive(Debug, Clone)]
pub enum ScreenViewModel {
    /// Paginated, searchable store table.
    List(ListViewModel),

    /// Full card for one store.
    Detail(DetailViewModel),

    /// Add or edit form.
    Form(FormViewModel),
}

/// Display information for the store listing screen.
#[derive(Debug, Clone)]
pub struct ListViewModel {
    /// Visible table rows, already windowed to the terminal height.
    pub rows: Vec<StoreRow>,

    /// Index of the selected row within `rows`.
    pub selected_index: usize,

    /// Search box state, shown while editing or when a filter is committed.
    pub search_bar: Option<SearchBarInfo>,

    /// Pagination bar state.
    pub pagination: PaginationInfo,

    /// Whether a listing request is in flight.
    pub loading: bool,

    /// Message from a failed listing request.
    pub error: Option<String>,

    /// Placeholder shown when the listing is empty and idle.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single store row.
#[derive(Debug, Clone)]
pub struct StoreRow {
    /// Store display name.
    pub name: String,

    /// URL-friendly alias.
    pub alias: String,

    /// Formatted "lat, lng" coordinate pair.
    pub location: String,

    /// Whether this row is currently selected.
    pub is_selected: bool,

    /// Character ranges of the name matching the committed search.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Pagination bar display information.
#[derive(Debug, Clone)]
pub struct PaginationInfo {
    /// Displayed page (1-based).
    pub current_page: usize,

    /// Total number of pages for the filtered sequence.
    pub total_pages: usize,

    /// Total records in the filtered sequence.
    pub total_items: usize,

    /// Whether paging backwards is currently possible.
    pub prev_enabled: bool,

    /// Whether paging forwards is currently possible.
    pub next_enabled: bool,
}

/// Display information for the store detail screen.
#[derive(Debug, Clone)]
pub enum DetailViewModel {
    /// The fetch is still in flight.
    Loading,

    /// The fetch failed with this message.
    Error(String),

    /// The record is available to render.
    Loaded(StoreCard),
}

/// Display-ready fields for one store card.
#[derive(Debug, Clone)]
pub struct StoreCard {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub description: String,

    /// Formatted "lat, lng" coordinate pair.
    pub coordinates: String,

    /// Street address, absent for stores without one.
    pub address: Option<String>,

    pub image: String,
    pub thumbnail: String,

    /// Human-readable creation date.
    pub created: String,
}

/// Display information for the add and edit form screens.
#[derive(Debug, Clone)]
pub struct FormViewModel {
    /// Screen title ("Add Store" or "Edit Store").
    pub title: String,

    /// Field rows in traversal order.
    pub fields: Vec<FieldRow>,

    /// Whether a submission is in flight.
    pub submitting: bool,

    /// Message from a failed submission.
    pub error: Option<String>,
}

/// Display information for one form field row.
#[derive(Debug, Clone)]
pub struct FieldRow {
    /// Field label.
    pub label: &'static str,

    /// Current buffer contents.
    pub value: String,

    /// Whether this field receives character input.
    pub is_focused: bool,

    /// Validation message from the last submit attempt.
    pub error: Option<String>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit  /: search  a: add").
    pub keybindings: String,
}

/// Empty state message display information.
///
/// Shown when the listing has no rows, distinguishing an empty dataset from a
/// search with no matches.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No stores yet").
    pub message: String,

    /// Secondary explanatory text (e.g., "Press 'a' to add your first store").
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Search text to display: the draft while editing, the committed query
    /// otherwise.
    pub query: String,

    /// Whether the box is in input mode (cursor shown, border accented).
    pub editing: bool,
}
