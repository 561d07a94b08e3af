//! Crossterm terminal surface.
//!
//! Paints a [`Layout`] onto a character grid. Pixel coordinates are mapped to
//! cells through [`CellMetrics`]; block backgrounds are filled with spaces and
//! fragments are printed with their resolved colour, weight and slant.
//! Anything outside the viewport is clipped.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::geometry::Size;
use crate::layout::measure::TextMeasure;
use crate::layout::model::{Fragment, Layout};
use crate::style::cascade::ResolvedStyle;
use crate::style::color::Color;
use crate::style::styles::FontStyle;

use super::surface::RenderSurface;

// ---------------------------------------------------------------------------
// CellMetrics
// ---------------------------------------------------------------------------

/// Size of one terminal cell in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self { width: 8.0, height: 16.0 }
    }
}

impl CellMetrics {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Column containing pixel `x`.
    pub fn column(&self, x: f32) -> i32 {
        (x / self.width).floor() as i32
    }

    /// Row containing pixel `y`.
    pub fn row(&self, y: f32) -> i32 {
        (y / self.height).floor() as i32
    }

    /// Whole cells that fit in `viewport`: (columns, rows), capped at the
    /// largest cursor position a terminal can address.
    pub fn grid(&self, viewport: Size) -> (i32, i32) {
        let cells = |len: f32, cell: f32| ((len / cell).floor() as i32).clamp(0, i32::from(u16::MAX));
        (
            cells(viewport.width, self.width),
            cells(viewport.height, self.height),
        )
    }
}

/// Every character takes exactly one cell, whatever its font size. Layouts
/// measured this way line up with the printed grid.
impl TextMeasure for CellMetrics {
    fn measure(&self, text: &str, _style: &ResolvedStyle) -> f32 {
        text.chars().count() as f32 * self.width
    }
}

/// Convert an RGBA colour to a terminal colour. Fully transparent is `None`.
pub fn to_terminal_color(color: Color) -> Option<TermColor> {
    if color.is_transparent() {
        None
    } else {
        Some(TermColor::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        })
    }
}

// ---------------------------------------------------------------------------
// TerminalSurface
// ---------------------------------------------------------------------------

/// Render surface writing crossterm escape sequences to `W`.
///
/// Does not enter the alternate screen on creation; call
/// [`enter_alt_screen`](Self::enter_alt_screen) explicitly.
pub struct TerminalSurface<W: Write> {
    writer: W,
    metrics: CellMetrics,
}

impl TerminalSurface<BufWriter<Stdout>> {
    /// A surface on buffered stdout.
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }

    /// Terminal size in cells (columns, rows).
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            metrics: CellMetrics::default(),
        }
    }

    /// Set the pixel size of a cell (builder).
    pub fn with_metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, EnterAlternateScreen, cursor::Hide)
    }

    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Show, LeaveAlternateScreen)
    }

    fn fill_backgrounds(&mut self, layout: &Layout, cols: i32, rows: i32) -> io::Result<()> {
        for block in &layout.blocks {
            let Some(bg) = to_terminal_color(block.background) else {
                continue;
            };
            let outer = block.outer_rect(layout.content_width);
            let first_row = self.metrics.row(outer.y).max(0);
            let last_row = self.metrics.row(outer.bottom()).min(rows);
            let width = self.metrics.column(outer.right()).min(cols).max(0) as usize;
            for row in first_row..last_row {
                queue!(
                    self.writer,
                    cursor::MoveTo(0, row as u16),
                    SetBackgroundColor(bg),
                    Print(" ".repeat(width)),
                    ResetColor
                )?;
            }
        }
        Ok(())
    }

    fn print_fragment(
        &mut self,
        fragment: &Fragment,
        background: Option<TermColor>,
        col: i32,
        row: i32,
        cols: i32,
    ) -> io::Result<()> {
        let start = col.max(0);
        let skip = (start - col) as usize;
        let room = (cols - start).max(0) as usize;
        let text: String = fragment.text.chars().skip(skip).take(room).collect();
        if text.is_empty() {
            return Ok(());
        }

        queue!(self.writer, cursor::MoveTo(start as u16, row as u16))?;
        if let Some(fg) = to_terminal_color(fragment.style.color) {
            queue!(self.writer, SetForegroundColor(fg))?;
        }
        if let Some(bg) = background {
            queue!(self.writer, SetBackgroundColor(bg))?;
        }
        if fragment.style.font_weight.is_bold() {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        if fragment.style.font_style != FontStyle::Normal {
            queue!(self.writer, SetAttribute(Attribute::Italic))?;
        }
        queue!(self.writer, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    type Error = io::Error;

    fn present(&mut self, viewport: Size, layout: &Layout) -> io::Result<()> {
        let (cols, rows) = self.metrics.grid(viewport);
        queue!(self.writer, Clear(ClearType::All))?;
        self.fill_backgrounds(layout, cols, rows)?;

        for block in &layout.blocks {
            let block_bg = to_terminal_color(block.background);
            for line in &block.lines {
                let row = self.metrics.row(block.top + line.y);
                if row < 0 || row >= rows {
                    continue;
                }
                for fragment in &line.fragments {
                    let col = self.metrics.column(line.x + fragment.x);
                    // A span's own background wins over the block box.
                    let bg = to_terminal_color(fragment.style.background_color).or(block_bg);
                    self.print_fragment(fragment, bg, col, row, cols)?;
                }
            }
        }
        self.writer.flush()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
