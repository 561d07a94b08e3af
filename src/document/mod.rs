//! Document model: slotmap-backed Frame → Block → Span tree.

pub mod frame;
pub mod node;

pub use frame::{BlockMut, Frame, SpanMut};
pub use node::{Block, BlockId, Span, SpanId};
