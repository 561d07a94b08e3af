//! Layout output: an immutable snapshot of block boxes, lines and fragments.

use std::sync::Arc;

use crate::document::node::{BlockId, SpanId};
use crate::geometry::Rect;
use crate::style::cascade::ResolvedStyle;
use crate::style::color::Color;
use crate::style::styles::TextAlign;

/// A run of one span's text placed on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub span: SpanId,
    /// Exact substring of the span's text.
    pub text: String,
    /// Offset from the start of the line.
    pub x: f32,
    pub width: f32,
    pub style: Arc<ResolvedStyle>,
}

/// One wrapped line of a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Left edge within the frame, padding and alignment included.
    pub x: f32,
    /// Top edge relative to the block's content top.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fragments: Vec<Fragment>,
}

impl Line {
    /// The visible text of the line: all fragments concatenated.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Geometry of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    pub block: BlockId,
    /// Top of the content box within the frame (outer top + padding).
    pub top: f32,
    pub padding: f32,
    /// Sum of line heights; padding excluded.
    pub height: f32,
    pub text_align: TextAlign,
    pub background: Color,
    pub border_color: Color,
    pub lines: Vec<Line>,
}

impl BlockLayout {
    /// The outer box including padding on every side.
    pub fn outer_rect(&self, content_width: f32) -> Rect {
        Rect::new(
            0.0,
            self.top - self.padding,
            content_width,
            self.height + 2.0 * self.padding,
        )
    }

    /// The content box: outer box minus padding.
    pub fn content_rect(&self, content_width: f32) -> Rect {
        self.outer_rect(content_width).inset(self.padding)
    }

    /// Line tops relative to the frame.
    pub fn line_tops(&self) -> impl Iterator<Item = f32> + '_ {
        self.lines.iter().map(move |line| self.top + line.y)
    }
}

/// The complete layout of a frame at one content width.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub content_width: f32,
    pub blocks: Vec<BlockLayout>,
    /// Bottom of the last block's outer box.
    pub height: f32,
}

impl Layout {
    pub fn block(&self, id: BlockId) -> Option<&BlockLayout> {
        self.blocks.iter().find(|b| b.block == id)
    }

    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }

    pub fn fragment_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.lines)
            .map(|l| l.fragments.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
