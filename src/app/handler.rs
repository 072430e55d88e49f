//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::config::Action;
use crate::ui::grid::GridGeometry;
use crate::ui::layout::AppLayout;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Grid => handle_grid_key(state, key),
        ActiveView::Search => handle_search_key(state, key),
    }
}

// ── Grid view (configurable bindings) ───────────────────────────

fn handle_grid_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::OpenSearch => {
            state.active_view = ActiveView::Search;
        }
        Action::MoveUp => move_hover(state, 0, -1),
        Action::MoveDown => move_hover(state, 0, 1),
        Action::MoveLeft => move_hover(state, -1, 0),
        Action::MoveRight => move_hover(state, 1, 0),
        Action::Confirm => {
            if let Some(selection) = state.grid.confirm_from_hover() {
                state.confirm_selection(selection);
            }
        }
    }
}

/// Keyboard hover movement. The first move lands on the origin cell; later
/// moves step from the current hover, clamped to the grid.
fn move_hover(state: &mut AppState, dx: i32, dy: i32) {
    let dims = state.grid.dims;
    if dims.rows == 0 || dims.cols == 0 {
        return;
    }
    let (x, y) = match state.grid.hover_cell() {
        Some(cell) => {
            let x = (cell.x as i32 + dx).clamp(0, dims.cols as i32 - 1);
            let y = (cell.y as i32 + dy).clamp(0, dims.rows as i32 - 1);
            (x as u16, y as u16)
        }
        None => (0, 0),
    };
    state.grid.hover(x, y);
}

// ── Search modal ────────────────────────────────────────────────

fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.active_view = ActiveView::Grid;
        }
        KeyCode::Enter => {
            // Enter opens the highlighted result when one exists; otherwise
            // it runs the query.
            if let Some(index) = state.search.selected {
                state.navigate_to(index);
            } else if !state.search.keyword.trim().is_empty() {
                state.search.wants_search = true;
            }
        }
        KeyCode::Up => state.search.select_prev(),
        KeyCode::Down => state.search.select_next(),
        KeyCode::Backspace => state.search.pop_char(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.search.push_char(c);
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Grid {
        return;
    }

    let layout = AppLayout::from_area(state.terminal_area, state.grid.dims, state.cell_size);
    let geo = GridGeometry::new(layout.grid_area, state.grid.dims, state.cell_size);
    let position = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved => {
            if let Some(cell) = geo.cell_at(mouse.column, mouse.row) {
                state.grid.hover(cell.x, cell.y);
            } else if !layout.grid_area.contains(position) {
                // Gaps between cells keep the current hover; leaving the
                // grid block clears it.
                state.grid.clear_hover();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(cell) = geo.cell_at(mouse.column, mouse.row) {
                // Direct cell press selects that block, hover or not.
                state.confirm_selection(state.grid.confirm_at(cell.x, cell.y));
            } else if layout.grid_area.contains(position) {
                // Press on the surrounding block commits the hovered size.
                if let Some(selection) = state.grid.confirm_from_hover() {
                    state.confirm_selection(selection);
                }
            }
        }
        _ => {}
    }
}
