//! Rendering: the surface boundary, the crossterm terminal surface and the
//! build/sync bridge.

pub mod bridge;
pub mod surface;
pub mod terminal;

pub use bridge::{BuildError, BuiltLayout, LayoutState, RichTextView, SyncOutcome};
pub use surface::RenderSurface;
pub use terminal::{CellMetrics, TerminalSurface};
