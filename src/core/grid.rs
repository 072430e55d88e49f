//! Grid selection model — hover tracking and block-size confirmation.
//!
//! The widget presents an R×C grid; hovering a cell previews the rectangular
//! block from the origin to that cell, and confirming reports the block size
//! as 1-based `(rows, cols)`. All logic here is pure state over coordinates;
//! rendering and input mapping live in `ui::grid` and `app::handler`.

/// Fixed grid dimensions, supplied at construction.
///
/// Degenerate dimensions (zero rows or cols) are tolerated: the grid simply
/// has no cells and no operation can produce a hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub rows: u16,
    pub cols: u16,
}

impl GridDims {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self { rows: 10, cols: 10 }
    }
}

/// A 0-based cell coordinate inside the grid (`x` = column, `y` = row).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoord {
    pub x: u16,
    pub y: u16,
}

/// A confirmed block size, 1-based. One-shot event payload — never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub rows: u16,
    pub cols: u16,
}

impl CellCoord {
    /// The block size previewed/confirmed by this cell: `(y+1, x+1)`.
    fn to_selection(self) -> Selection {
        Selection {
            rows: self.y + 1,
            cols: self.x + 1,
        }
    }
}

/// Interactive state of one grid-select widget.
#[derive(Debug, Clone)]
pub struct GridState {
    pub dims: GridDims,
    /// Cell currently under the pointer, `None` outside the grid.
    /// Invariant: when present, `x < dims.cols && y < dims.rows`.
    hover: Option<CellCoord>,
    /// Disabled grids never show a hover highlight.
    pub disabled: bool,
}

impl GridState {
    pub fn new(dims: GridDims, disabled: bool) -> Self {
        Self {
            dims,
            hover: None,
            disabled,
        }
    }

    pub fn hover_cell(&self) -> Option<CellCoord> {
        self.hover
    }

    /// Pointer entered the cell at `(x, y)`.
    ///
    /// Disabled grids clear any existing highlight instead of tracking the
    /// pointer. Out-of-range coordinates are treated as leaving the grid.
    pub fn hover(&mut self, x: u16, y: u16) {
        if self.disabled || x >= self.dims.cols || y >= self.dims.rows {
            self.hover = None;
            return;
        }
        self.hover = Some(CellCoord { x, y });
    }

    /// Pointer left the grid region.
    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Direct press on the cell at `(x, y)`.
    ///
    /// Always reports a selection, independent of the current hover and of
    /// the disabled flag — a disabled grid suppresses the preview highlight
    /// but not click-to-select.
    pub fn confirm_at(&self, x: u16, y: u16) -> Selection {
        CellCoord { x, y }.to_selection()
    }

    /// Press inside the grid container but not on a specific cell.
    /// Reports the hovered block size, or nothing when no cell is hovered.
    pub fn confirm_from_hover(&self) -> Option<Selection> {
        self.hover.map(CellCoord::to_selection)
    }

    /// Whether the cell at `(x, y)` is inside the preview rectangle —
    /// the block from the origin to the hovered cell, inclusive.
    pub fn is_highlighted(&self, x: u16, y: u16) -> bool {
        match self.hover {
            Some(h) => x <= h.x && y <= h.y,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighted_cells(state: &GridState) -> Vec<(u16, u16)> {
        let mut out = Vec::new();
        for y in 0..state.dims.rows {
            for x in 0..state.dims.cols {
                if state.is_highlighted(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn hover_highlights_origin_rectangle() {
        let mut state = GridState::new(GridDims::new(10, 10), false);
        state.hover(3, 2);
        let cells = highlighted_cells(&state);
        assert_eq!(cells.len(), 4 * 3);
        for &(x, y) in &cells {
            assert!(x <= 3 && y <= 2);
        }
    }

    #[test]
    fn clear_hover_empties_highlight() {
        let mut state = GridState::new(GridDims::new(10, 10), false);
        state.hover(5, 5);
        state.clear_hover();
        assert!(highlighted_cells(&state).is_empty());
        assert_eq!(state.confirm_from_hover(), None);
    }

    #[test]
    fn confirm_at_reports_one_based_size() {
        let state = GridState::new(GridDims::new(10, 10), false);
        assert_eq!(state.confirm_at(4, 4), Selection { rows: 5, cols: 5 });
        assert_eq!(state.confirm_at(0, 0), Selection { rows: 1, cols: 1 });
    }

    #[test]
    fn confirm_at_ignores_hover_state() {
        let mut state = GridState::new(GridDims::new(10, 10), false);
        state.hover(9, 9);
        assert_eq!(state.confirm_at(1, 2), Selection { rows: 3, cols: 2 });
    }

    #[test]
    fn confirm_from_hover_without_hover_is_none() {
        let state = GridState::new(GridDims::new(10, 10), false);
        assert_eq!(state.confirm_from_hover(), None);
    }

    #[test]
    fn confirm_from_hover_uses_hovered_cell() {
        let mut state = GridState::new(GridDims::new(10, 10), false);
        state.hover(2, 3);
        assert_eq!(
            state.confirm_from_hover(),
            Some(Selection { rows: 4, cols: 3 })
        );
    }

    #[test]
    fn hover_bottom_right_of_five_block() {
        let mut state = GridState::new(GridDims::new(10, 10), false);
        state.hover(4, 4);
        assert_eq!(highlighted_cells(&state).len(), 25);
        assert_eq!(state.confirm_at(4, 4), Selection { rows: 5, cols: 5 });
    }

    #[test]
    fn disabled_grid_suppresses_hover_but_not_click() {
        let mut state = GridState::new(GridDims::new(10, 10), true);
        state.hover(1, 1);
        assert!(highlighted_cells(&state).is_empty());
        assert_eq!(state.confirm_from_hover(), None);
        assert_eq!(state.confirm_at(1, 1), Selection { rows: 2, cols: 2 });
    }

    #[test]
    fn disabling_clears_stale_hover_on_next_event() {
        let mut state = GridState::new(GridDims::new(10, 10), false);
        state.hover(4, 4);
        state.disabled = true;
        state.hover(5, 5);
        assert_eq!(state.hover_cell(), None);
    }

    #[test]
    fn out_of_range_hover_clears() {
        let mut state = GridState::new(GridDims::new(3, 3), false);
        state.hover(1, 1);
        state.hover(7, 0);
        assert_eq!(state.hover_cell(), None);
    }

    #[test]
    fn zero_sized_grid_has_no_cells() {
        let mut state = GridState::new(GridDims::new(0, 0), false);
        state.hover(0, 0);
        assert_eq!(state.hover_cell(), None);
        assert_eq!(state.confirm_from_hover(), None);
    }
}
