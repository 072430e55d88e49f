//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::grid::GridDims;
use crate::ui::grid::GridGeometry;

/// Primary screen layout: the grid block centered in the content area and a
/// bottom status bar.
pub struct AppLayout {
    pub grid_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, dims: GridDims, cell_size: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // content (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let block_w = GridGeometry::grid_width(dims, cell_size).saturating_add(2);
        // cells + separator + footer + two border rows
        let block_h = dims.rows.saturating_add(4);

        Self {
            grid_area: centered_fixed(block_w, block_h, chunks[0]),
            status_area: chunks[1],
        }
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the
/// available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_is_one_row_at_bottom() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24), GridDims::new(10, 10), 2);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 23);
    }

    #[test]
    fn oversized_dimensions_do_not_overflow_layout() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24), GridDims::new(10, 30000), 2);
        assert!(layout.grid_area.width <= 80);
    }

    #[test]
    fn grid_block_clamps_to_small_terminals() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 10, 5), GridDims::new(10, 10), 2);
        assert!(layout.grid_area.width <= 10);
        assert!(layout.grid_area.height <= 4);
    }
}
