//! Node types: BlockId, SpanId, Block, Span.

use slotmap::new_key_type;

new_key_type! {
    /// Identifier of a block within its frame. Copy, lightweight (u64).
    pub struct BlockId;
}

new_key_type! {
    /// Identifier of a span within its frame. Copy, lightweight (u64).
    pub struct SpanId;
}

/// A paragraph-like unit: an ordered run of spans plus an optional style name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub(crate) style_name: Option<String>,
    pub(crate) spans: Vec<SpanId>,
}

impl Block {
    /// The style name this block refers to, if any.
    pub fn style_name(&self) -> Option<&str> {
        self.style_name.as_deref()
    }

    /// The block's spans, in insertion order.
    pub fn span_ids(&self) -> &[SpanId] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// A run of text. The text never changes after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub(crate) text: String,
    pub(crate) style_name: Option<String>,
}

impl Span {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_name: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The style name this span refers to, if any.
    pub fn style_name(&self) -> Option<&str> {
        self.style_name.as_deref()
    }
}
