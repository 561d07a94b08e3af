//! Snapshot rendering helpers.
//!
//! Functions for converting a [`Layout`] into plain-text strings suitable for
//! snapshot testing and assertions.

use crate::layout::model::Layout;
use crate::render::terminal::CellMetrics;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Dump a layout as text: one output line per layout line, blocks separated
/// by an empty line.
///
/// ```ignore
/// let dump = layout_to_string(&layout);
/// assert_eq!(dump, "This is a header\n\nThis is a sub header");
/// ```
pub fn layout_to_string(layout: &Layout) -> String {
    layout
        .blocks
        .iter()
        .map(|block| {
            block
                .lines
                .iter()
                .map(|line| line.text())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Dump a layout with geometry: a header per block, then each line's
/// position, size and fragments.
pub fn layout_to_outline(layout: &Layout) -> String {
    let mut out = String::new();
    for (index, block) in layout.blocks.iter().enumerate() {
        out.push_str(&format!(
            "block {index} top={} pad={} h={} align={}\n",
            block.top,
            block.padding,
            block.height,
            block.text_align.as_str()
        ));
        for line in &block.lines {
            out.push_str(&format!(
                "  line x={} y={} w={} h={}:",
                line.x, line.y, line.width, line.height
            ));
            for fragment in &line.fragments {
                out.push_str(&format!(" [{:?} @{}]", fragment.text, fragment.x));
            }
            out.push('\n');
        }
    }
    out
}

/// Paint a layout onto a `cols` x `rows` character grid.
///
/// Each fragment is placed at the cell containing its pixel origin. Rows are
/// right-trimmed of spaces and joined with `'\n'`.
pub fn layout_to_grid(layout: &Layout, metrics: CellMetrics, cols: i32, rows: i32) -> String {
    if cols <= 0 || rows <= 0 {
        return String::new();
    }

    let mut grid: Vec<Vec<char>> = vec![vec![' '; cols as usize]; rows as usize];

    for block in &layout.blocks {
        for line in &block.lines {
            let row = metrics.row(block.top + line.y);
            if row < 0 || row >= rows {
                continue;
            }
            for fragment in &line.fragments {
                let start = metrics.column(line.x + fragment.x);
                for (i, ch) in fragment.text.chars().enumerate() {
                    let col = start + i as i32;
                    if col < 0 || col >= cols {
                        continue;
                    }
                    grid[row as usize][col as usize] = ch;
                }
            }
        }
    }

    grid.into_iter()
        .map(|row| {
            let s: String = row.into_iter().collect();
            s.trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
