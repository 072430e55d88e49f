//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::sync::Arc;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::grid::{GridDims, GridState, Selection};
use crate::core::search::{DocumentHit, DocumentSearcher};
use crate::ui::theme::GridStyles;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Grid,
    Search,
}

/// Lifecycle of the search modal's one asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Nothing requested yet (or the keyword was edited since).
    #[default]
    Idle,
    /// A query is in flight.
    Loading,
    /// The latest query failed; the message is shown as-is.
    Failed(String),
    /// The latest query completed; `results` holds its hits (possibly none).
    Loaded,
}

/// State owned by the search modal.
#[derive(Default)]
pub struct SearchModalState {
    pub keyword: String,
    pub phase: SearchPhase,
    pub results: Vec<DocumentHit>,
    /// Highlighted result row, `None` right after a search.
    pub selected: Option<usize>,
    /// Monotonic request token; only the response carrying the latest value
    /// is applied, stale responses are dropped.
    pub generation: u64,
    /// Set by the input handler; the main loop issues the query after the
    /// next draw.
    pub wants_search: bool,
}

impl SearchModalState {
    /// Append a character to the keyword. Editing invalidates any shown
    /// results.
    pub fn push_char(&mut self, c: char) {
        self.keyword.push(c);
        self.reset_results();
    }

    /// Delete the last keyword character.
    pub fn pop_char(&mut self) {
        self.keyword.pop();
        self.reset_results();
    }

    fn reset_results(&mut self) {
        self.results.clear();
        self.selected = None;
        self.phase = SearchPhase::Idle;
    }

    /// Mark a new query as issued and return its generation token.
    pub fn issue(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.phase = SearchPhase::Loading;
        self.selected = None;
        self.generation
    }

    pub fn select_next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(self.results.len() - 1),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }
}

/// Top-level application state.
pub struct AppState {
    /// The grid-select widget's interactive state.
    pub grid: GridState,
    /// Width of one grid cell in terminal columns.
    pub cell_size: u16,
    /// Visual overrides for the grid, patched over the theme.
    pub styles: GridStyles,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Search modal state.
    pub search: SearchModalState,
    /// The injected document-search backend, shared with query threads.
    pub searcher: Arc<dyn DocumentSearcher>,
    /// Maximum result rows per query.
    pub result_limit: usize,
    /// Document navigated to from the search modal, shown in the grid title.
    pub active_document: Option<DocumentHit>,
    /// Last confirmed block size; rendered as a markdown table on exit.
    pub last_selection: Option<Selection>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// User-configurable keybindings and grid defaults.
    pub config: AppConfig,
    /// Terminal dimensions, kept current by resize events.
    pub terminal_area: Rect,
    /// Tick counter driving the loading spinner.
    pub tick: u64,
}

impl AppState {
    pub fn new(
        dims: GridDims,
        cell_size: u16,
        disabled: bool,
        searcher: Arc<dyn DocumentSearcher>,
        result_limit: usize,
        config: AppConfig,
    ) -> Self {
        Self {
            grid: GridState::new(dims, disabled),
            cell_size,
            styles: GridStyles::default(),
            active_view: ActiveView::default(),
            search: SearchModalState::default(),
            searcher,
            result_limit,
            active_document: None,
            last_selection: None,
            should_quit: false,
            status_message: None,
            config,
            terminal_area: Rect::default(),
            tick: 0,
        }
    }

    /// Record a confirmed grid selection.
    pub fn confirm_selection(&mut self, selection: Selection) {
        self.last_selection = Some(selection);
        self.status_message = Some(format!(
            "{} × {} table ready — quit to print it",
            selection.rows, selection.cols
        ));
    }

    /// Navigation: make a search result the active document and close the
    /// modal.
    pub fn navigate_to(&mut self, index: usize) {
        let Some(hit) = self.search.results.get(index).cloned() else {
            return;
        };
        self.status_message = Some(format!("{} — now pick a table size", hit.title));
        self.active_document = Some(hit);
        self.active_view = ActiveView::Grid;
    }
}
