//! Markdown table skeleton generation from a confirmed grid selection.

use crate::core::grid::Selection;

/// Minimum column width so the empty skeleton stays readable/alignable.
const CELL_WIDTH: usize = 3;

/// Render a GitHub-flavored markdown table skeleton: one header row, a
/// delimiter row, and `selection.rows` empty body rows of `selection.cols`
/// cells each.
pub fn markdown_table(selection: Selection) -> String {
    let cols = selection.cols as usize;
    let rows = selection.rows as usize;
    if cols == 0 || rows == 0 {
        return String::new();
    }

    let blank = " ".repeat(CELL_WIDTH);
    let dashes = "-".repeat(CELL_WIDTH);

    let mut out = String::new();
    push_row(&mut out, cols, &blank);
    push_row(&mut out, cols, &dashes);
    for _ in 0..rows {
        push_row(&mut out, cols, &blank);
    }
    out
}

fn push_row(out: &mut String, cols: usize, cell: &str) {
    out.push('|');
    for _ in 0..cols {
        out.push_str(cell);
        out.push('|');
    }
    out.push('\n');
}
