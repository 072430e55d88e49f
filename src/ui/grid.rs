//! Grid-select widget — renders the cell matrix and maps mouse positions
//! back to cell coordinates.
//!
//! Cells are `cell_size` terminal columns wide and one row tall, separated
//! by a one-column gap. Cells that do not fit the available area are simply
//! not drawn (a truncated grid is tolerated, never an error).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::core::grid::{CellCoord, GridDims, GridState};
use crate::ui::theme::{GridStyles, Theme};

/// Horizontal gap between cells, in columns.
const H_GAP: u16 = 1;

/// Pixel-to-terminal mapping of the grid: where each cell lands inside the
/// widget's block, and the inverse lookup for mouse events.
#[derive(Debug, Clone, Copy)]
pub struct GridGeometry {
    origin_x: u16,
    origin_y: u16,
    dims: GridDims,
    cell_size: u16,
}

impl GridGeometry {
    /// Geometry for a grid rendered inside `block_area` (borders included).
    pub fn new(block_area: Rect, dims: GridDims, cell_size: u16) -> Self {
        Self {
            origin_x: block_area.x.saturating_add(1),
            origin_y: block_area.y.saturating_add(1),
            dims,
            cell_size: cell_size.max(1),
        }
    }

    /// Total width of the cell matrix in columns, saturating at `u16::MAX`.
    /// Dimensions come straight from the CLI, so oversized grids must clamp
    /// rather than wrap; the renderer already truncates cells that don't fit.
    pub fn grid_width(dims: GridDims, cell_size: u16) -> u16 {
        if dims.cols == 0 {
            return 0;
        }
        let cols = u32::from(dims.cols);
        let width = cols * u32::from(cell_size.max(1)) + (cols - 1) * u32::from(H_GAP);
        width.min(u32::from(u16::MAX)) as u16
    }

    /// On-screen rectangle of the cell at `(x, y)`.
    pub fn cell_rect(&self, x: u16, y: u16) -> Rect {
        let stride = self.cell_size.saturating_add(H_GAP);
        Rect::new(
            self.origin_x.saturating_add(x.saturating_mul(stride)),
            self.origin_y.saturating_add(y),
            self.cell_size,
            1,
        )
    }

    /// Map a terminal position to the cell under it, `None` on gaps or
    /// outside the cell matrix.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<CellCoord> {
        if column < self.origin_x || row < self.origin_y {
            return None;
        }
        let y = row - self.origin_y;
        if y >= self.dims.rows {
            return None;
        }
        let rel_x = column - self.origin_x;
        let stride = self.cell_size.saturating_add(H_GAP);
        let x = rel_x / stride;
        if rel_x % stride >= self.cell_size || x >= self.dims.cols {
            return None;
        }
        Some(CellCoord { x, y })
    }

    /// Row (terminal coordinates) of the footer preview line.
    fn footer_row(&self) -> u16 {
        self.origin_y
            .saturating_add(self.dims.rows)
            .saturating_add(1)
    }
}

/// The grid-select widget. Pure function of `(state, styles)` to cells in
/// the buffer; event wiring lives in the input handler.
pub struct GridSelectWidget<'a> {
    state: &'a GridState,
    cell_size: u16,
    styles: GridStyles,
    block: Block<'a>,
}

impl<'a> GridSelectWidget<'a> {
    pub fn new(state: &'a GridState, cell_size: u16) -> Self {
        Self {
            state,
            cell_size,
            styles: GridStyles::default(),
            block: Block::default(),
        }
    }

    pub fn styles(mut self, styles: GridStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block;
        self
    }
}

impl<'a> Widget for GridSelectWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.border_style(self.styles.grid()).render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let geo = GridGeometry::new(area, self.state.dims, self.cell_size);
        let hover = self.state.hover_cell();
        let fill = " ".repeat(self.cell_size as usize);

        for y in 0..self.state.dims.rows {
            if geo.cell_rect(0, y).bottom() > inner.bottom() {
                break;
            }
            for x in 0..self.state.dims.cols {
                let rect = geo.cell_rect(x, y);
                if rect.right() > inner.right() {
                    break;
                }
                let style = if self.state.disabled {
                    self.styles.disabled()
                } else if hover == Some(CellCoord { x, y }) {
                    self.styles.hover()
                } else if self.state.is_highlighted(x, y) {
                    self.styles.active()
                } else {
                    self.styles.cell()
                };
                buf.set_string(rect.x, rect.y, &fill, style);
            }
        }

        // Footer: centered block-size preview, blank while nothing hovers.
        let footer_y = geo.footer_row();
        if footer_y < inner.bottom() {
            if let Some(preview) = self.state.confirm_from_hover() {
                let text = format!("{} × {}", preview.rows, preview.cols);
                Paragraph::new(Line::from(Span::styled(text, Theme::preview_style())))
                    .centered()
                    .render(Rect::new(inner.x, footer_y, inner.width, 1), buf);
            }
        }
    }
}
