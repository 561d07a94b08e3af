//! # richlayout
//!
//! A styled rich-text document model with a named-style cascade and greedy
//! line layout.
//!
//! A [`Frame`] holds blocks of text spans. Blocks and spans refer to styles by
//! name; the frame's [`StyleSheet`] maps names to property sets. Layout
//! resolves every span's style (span over block over engine defaults), wraps
//! text at word boundaries into the content width and stacks block boxes.
//! A [`RichTextView`] builds layouts off the caller's task and hands finished
//! snapshots to a render surface.
//!
//! ## Core Systems
//!
//! - **[`style`]**: Property sets, named registry, sheet tokenizer and parser, cascade
//! - **[`document`]**: Slotmap-backed Frame → Block → Span arena
//! - **[`layout`]**: Text measurement, greedy line breaking, taffy block stacking
//! - **[`render`]**: Surface trait, crossterm terminal surface, build/sync bridge
//! - **[`media`]**: Streaming-media player boundary
//! - **[`testing`]**: Recording surface and plain-text layout dumps
//! - **[`config`]**: Layout and view configuration
//! - **[`geometry`]**: Point, Size, Rect primitives

// Foundation
pub mod config;
pub mod geometry;

// Core systems
pub mod document;
pub mod layout;
pub mod style;

// Rendering
pub mod render;

// External collaborators
pub mod media;

// Headless helpers
pub mod testing;

pub use config::{ConfigError, LayoutConfig, ViewConfig};
pub use document::{BlockId, Frame, SpanId};
pub use layout::{Layout, LayoutEngine, LayoutError};
pub use render::{BuildError, BuiltLayout, RenderSurface, RichTextView, SyncOutcome};
pub use style::{StyleSheet, PropertySet, ResolvedStyle};
