//! Greedy word-boundary line breaking.
//!
//! [`LayoutEngine`] resolves every span's style, splits span text into
//! whitespace and non-whitespace runs, groups runs into words (a span
//! boundary always ends a word), fills lines greedily against the block's
//! content width, aligns each line, and finally stacks the block boxes.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info_span, trace};

use crate::config::{ConfigError, LayoutConfig};
use crate::document::frame::Frame;
use crate::document::node::{Block, BlockId, SpanId};
use crate::style::cascade::{resolve_block, resolve_span, ResolvedStyle};
use crate::style::styles::TextAlign;

use super::measure::{AdvanceMeasurer, TextMeasure};
use super::model::{BlockLayout, Fragment, Layout, Line};
use super::stack::BlockStack;

/// Errors that stop a layout pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid layout configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("block stacking failed: {0}")]
    Stacking(String),

    #[error("{property} must be non-negative and finite, got {value}")]
    InvalidLength { property: &'static str, value: f32 },
}

/// Reject a resolved length that would break geometry.
fn check_length(property: &'static str, value: f32) -> Result<f32, LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidLength { property, value })
    }
}

// ---------------------------------------------------------------------------
// Runs, words, gaps
// ---------------------------------------------------------------------------

/// A measured whitespace or non-whitespace run of one span.
#[derive(Clone)]
struct Item<'a> {
    span: SpanId,
    source: &'a str,
    start: usize,
    end: usize,
    width: f32,
    space: bool,
    style: Arc<ResolvedStyle>,
}

enum Segment<'a> {
    Word { items: Vec<Item<'a>>, width: f32 },
    Gap { items: Vec<Item<'a>>, width: f32 },
}

/// Byte ranges of alternating whitespace / non-whitespace runs.
fn split_runs(text: &str) -> Vec<(usize, usize, bool)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match current {
            Some(prev) if prev == space => {}
            Some(prev) => {
                runs.push((start, i, prev));
                start = i;
                current = Some(space);
            }
            None => current = Some(space),
        }
    }
    if let Some(space) = current {
        runs.push((start, text.len(), space));
    }
    runs
}

/// Group items into maximal words and gaps. Words never span two spans.
fn group_segments(items: Vec<Item<'_>>) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    for item in items {
        let width = item.width;
        match segments.last_mut() {
            Some(Segment::Word { items, width: w })
                if !item.space && items.last().is_some_and(|last| last.span == item.span) =>
            {
                items.push(item);
                *w += width;
            }
            Some(Segment::Gap { items, width: w }) if item.space => {
                items.push(item);
                *w += width;
            }
            _ if item.space => segments.push(Segment::Gap {
                items: vec![item],
                width,
            }),
            _ => segments.push(Segment::Word {
                items: vec![item],
                width,
            }),
        }
    }
    segments
}

/// Fill lines greedily. Gaps at line starts and ends are dropped; a word
/// wider than `available` sits alone on its line.
fn break_lines(segments: Vec<Segment<'_>>, available: f32) -> Vec<(Vec<Item<'_>>, f32)> {
    let mut lines = Vec::new();
    let mut current: Vec<Item<'_>> = Vec::new();
    let mut width = 0.0;
    let mut gap: Option<(Vec<Item<'_>>, f32)> = None;

    for segment in segments {
        match segment {
            Segment::Gap { items, width: w } => {
                if !current.is_empty() {
                    gap = Some((items, w));
                }
            }
            Segment::Word { items, width: w } => {
                let (gap_items, gap_width) = gap.take().unwrap_or_default();
                if current.is_empty() {
                    current = items;
                    width = w;
                } else if width + gap_width + w <= available {
                    current.extend(gap_items);
                    current.extend(items);
                    width += gap_width + w;
                } else {
                    lines.push((std::mem::take(&mut current), width));
                    current = items;
                    width = w;
                }
            }
        }
    }
    if !current.is_empty() {
        lines.push((current, width));
    }
    lines
}

/// Merge consecutive runs of the same span into fragments.
fn merge_fragments(items: Vec<Item<'_>>) -> Vec<Fragment> {
    struct Open<'a> {
        span: SpanId,
        source: &'a str,
        start: usize,
        end: usize,
        x: f32,
        width: f32,
        style: Arc<ResolvedStyle>,
    }

    let mut open: Vec<Open<'_>> = Vec::new();
    let mut x = 0.0;
    for item in items {
        match open.last_mut() {
            Some(last) if last.span == item.span && last.end == item.start => {
                last.end = item.end;
                last.width += item.width;
            }
            _ => open.push(Open {
                span: item.span,
                source: item.source,
                start: item.start,
                end: item.end,
                x,
                width: item.width,
                style: item.style,
            }),
        }
        x += item.width;
    }

    open.into_iter()
        .map(|o| Fragment {
            span: o.span,
            text: o.source[o.start..o.end].to_owned(),
            x: o.x,
            width: o.width,
            style: o.style,
        })
        .collect()
}

fn align_offset(align: TextAlign, available: f32, width: f32) -> f32 {
    let offset = match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => (available - width) / 2.0,
        TextAlign::Right => available - width,
    };
    offset.max(0.0)
}

// ---------------------------------------------------------------------------
// LayoutEngine
// ---------------------------------------------------------------------------

/// Turns a [`Frame`] into an immutable [`Layout`].
#[derive(Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    measurer: Arc<dyn TextMeasure>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    /// An engine using the default [`AdvanceMeasurer`].
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            measurer: Arc::new(AdvanceMeasurer),
        }
    }

    /// Replace the text measurer (builder).
    pub fn with_measurer(mut self, measurer: impl TextMeasure + 'static) -> Self {
        self.measurer = Arc::new(measurer);
        self
    }

    /// Share an existing measurer (builder).
    pub fn with_shared_measurer(mut self, measurer: Arc<dyn TextMeasure>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    /// Lay out every block of `frame`.
    ///
    /// Fails on an invalid configuration or on a resolved font-size or
    /// block-padding that is negative or not finite. Undefined style names
    /// and over-wide words are not errors.
    pub fn layout(&self, frame: &Frame) -> Result<Layout, LayoutError> {
        self.config.validate()?;

        let span = info_span!(
            "layout",
            width = self.config.content_width,
            blocks = frame.block_count()
        );
        let _guard = span.enter();

        let mut blocks = Vec::with_capacity(frame.block_count());
        let mut stack = BlockStack::new();
        for (id, block) in frame.blocks() {
            let laid = self.layout_block(frame, id, block)?;
            stack.push(laid.height + 2.0 * laid.padding)?;
            blocks.push(laid);
        }

        let stacked = stack.compute(self.config.content_width)?;
        for (block, outer_top) in blocks.iter_mut().zip(&stacked.tops) {
            block.top = outer_top + block.padding;
        }

        let layout = Layout {
            content_width: self.config.content_width,
            blocks,
            height: stacked.height,
        };
        debug!(
            blocks = layout.blocks.len(),
            lines = layout.line_count(),
            fragments = layout.fragment_count(),
            height = layout.height,
            "layout complete"
        );
        Ok(layout)
    }

    fn layout_block(&self, frame: &Frame, id: BlockId, block: &Block) -> Result<BlockLayout, LayoutError> {
        let block_style = resolve_block(frame.styles(), block.style_name());
        let padding = check_length("block-padding", block_style.block_padding)?;
        let available = (self.config.content_width - 2.0 * padding).max(0.0);

        let items = self.collect_items(frame, id, block)?;
        let broken = break_lines(group_segments(items), available);

        let mut lines = Vec::with_capacity(broken.len());
        let mut y = 0.0;
        for (index, (items, width)) in broken.into_iter().enumerate() {
            let max_size = items
                .iter()
                .filter(|item| !item.space)
                .map(|item| item.style.font_size)
                .fold(0.0, f32::max);
            let height = max_size * self.config.leading;
            let x = padding + align_offset(block_style.text_align, available, width);

            trace!(block = ?id, line = index, width, height, overflow = width > available, "line break");
            lines.push(Line {
                x,
                y,
                width,
                height,
                fragments: merge_fragments(items),
            });
            y += height;
        }

        Ok(BlockLayout {
            block: id,
            top: 0.0,
            padding,
            height: y,
            text_align: block_style.text_align,
            background: block_style.background_color,
            border_color: block_style.border_color,
            lines,
        })
    }

    fn collect_items<'f>(
        &self,
        frame: &'f Frame,
        id: BlockId,
        block: &Block,
    ) -> Result<Vec<Item<'f>>, LayoutError> {
        let mut items = Vec::new();
        for (span_id, span) in frame.spans(id) {
            let style = resolve_span(frame.styles(), block.style_name(), span.style_name());
            check_length("font-size", style.font_size)?;
            let style = Arc::new(style);
            let text = span.text();
            if text.is_empty() {
                items.push(Item {
                    span: span_id,
                    source: text,
                    start: 0,
                    end: 0,
                    width: 0.0,
                    space: false,
                    style,
                });
                continue;
            }
            for (start, end, space) in split_runs(text) {
                let width = self.measurer.measure(&text[start..end], &style);
                items.push(Item {
                    span: span_id,
                    source: text,
                    start,
                    end,
                    width,
                    space,
                    style: Arc::clone(&style),
                });
            }
        }
        Ok(items)
    }
}
