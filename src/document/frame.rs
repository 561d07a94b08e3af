//! The document root: an append-only Frame → Block → Span tree.

use slotmap::SlotMap;

use super::node::{Block, BlockId, Span, SpanId};
use crate::style::registry::StyleSheet;

/// Root of one rich-text document.
///
/// Blocks and spans live in slotmap arenas owned by the frame. Block order is
/// kept in a separate vec; span order lives in each block. Nothing is ever
/// removed or reordered, so traversal is always top-down and needs no parent
/// links.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    blocks: SlotMap<BlockId, Block>,
    spans: SlotMap<SpanId, Span>,
    order: Vec<BlockId>,
    styles: StyleSheet,
}

impl Frame {
    /// Create an empty frame with an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frame that owns `styles`.
    pub fn with_styles(styles: StyleSheet) -> Self {
        Self {
            styles,
            ..Self::default()
        }
    }

    /// Append a new empty block and return a handle for further mutation.
    pub fn insert_block(&mut self) -> BlockMut<'_> {
        let id = self.blocks.insert(Block::default());
        self.order.push(id);
        BlockMut { frame: self, id }
    }

    /// Mutable handle to an existing block.
    pub fn block_mut(&mut self, id: BlockId) -> Option<BlockMut<'_>> {
        if self.blocks.contains_key(id) {
            Some(BlockMut { frame: self, id })
        } else {
            None
        }
    }

    /// Mutable handle to an existing span.
    pub fn span_mut(&mut self, id: SpanId) -> Option<SpanMut<'_>> {
        if self.spans.contains_key(id) {
            Some(SpanMut { frame: self, id })
        } else {
            None
        }
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn span(&self, id: SpanId) -> Option<&Span> {
        self.spans.get(id)
    }

    /// Blocks in insertion order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.blocks.get(id).map(|block| (id, block)))
    }

    /// Spans of `block` in insertion order. Empty if the block does not exist.
    pub fn spans(&self, block: BlockId) -> impl Iterator<Item = (SpanId, &Span)> + '_ {
        self.blocks
            .get(block)
            .map(|b| b.spans.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&id| self.spans.get(id).map(|span| (id, span)))
    }

    /// Concatenated text of all spans in `block`.
    pub fn block_text(&self, block: BlockId) -> String {
        self.spans(block).map(|(_, span)| span.text()).collect()
    }

    pub fn block_count(&self) -> usize {
        self.order.len()
    }

    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The frame's style sheet.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Mutable access to the frame's style sheet.
    pub fn styles_mut(&mut self) -> &mut StyleSheet {
        &mut self.styles
    }

    /// Replace the frame's style sheet wholesale.
    pub fn set_styles(&mut self, styles: StyleSheet) {
        self.styles = styles;
    }
}

/// Mutable handle to one block of a [`Frame`].
pub struct BlockMut<'a> {
    frame: &'a mut Frame,
    id: BlockId,
}

impl<'a> BlockMut<'a> {
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Append a span with `text` and return a handle to it.
    pub fn insert_span(&mut self, text: impl Into<String>) -> SpanMut<'_> {
        let id = self.frame.spans.insert(Span::new(text));
        if let Some(block) = self.frame.blocks.get_mut(self.id) {
            block.spans.push(id);
        }
        SpanMut {
            frame: &mut *self.frame,
            id,
        }
    }

    /// Set the block's style name. Last write wins.
    pub fn set_style_name(&mut self, name: impl Into<String>) -> &mut Self {
        if let Some(block) = self.frame.blocks.get_mut(self.id) {
            block.style_name = Some(name.into());
        }
        self
    }

    pub fn clear_style_name(&mut self) -> &mut Self {
        if let Some(block) = self.frame.blocks.get_mut(self.id) {
            block.style_name = None;
        }
        self
    }
}

/// Mutable handle to one span of a [`Frame`]. Only the style name can change.
pub struct SpanMut<'a> {
    frame: &'a mut Frame,
    id: SpanId,
}

impl<'a> SpanMut<'a> {
    pub fn id(&self) -> SpanId {
        self.id
    }

    /// Set the span's style name. Last write wins.
    pub fn set_style_name(&mut self, name: impl Into<String>) -> &mut Self {
        if let Some(span) = self.frame.spans.get_mut(self.id) {
            span.style_name = Some(name.into());
        }
        self
    }

    pub fn clear_style_name(&mut self) -> &mut Self {
        if let Some(span) = self.frame.spans.get_mut(self.id) {
            span.style_name = None;
        }
        self
    }
}
