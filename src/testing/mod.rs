//! Headless testing helpers: a recording surface and plain-text layout dumps.
//!
//! Use [`RecordingSurface`] to drive a
//! [`RichTextView`](crate::render::bridge::RichTextView) without a terminal.
//! Use [`layout_to_string`] and related helpers to capture layouts as text
//! for snapshot-style assertions.

pub mod recorder;
pub mod snapshot;

pub use recorder::{Presentation, RecordingError, RecordingSurface};
pub use snapshot::{layout_to_grid, layout_to_outline, layout_to_string};
