//! Style engine: property sets, named registry, sheet parsing, cascade.

pub mod cascade;
pub mod color;
pub mod parser;
pub mod properties;
pub mod registry;
pub mod styles;
pub mod tokenizer;

pub use cascade::{resolve_block, resolve_span, ResolvedStyle};
pub use color::Color;
pub use properties::{PropertyError, PropertyKey, RawValue};
pub use registry::{StyleError, StyleSheet};
pub use styles::{FontStyle, FontWeight, PropertySet, PropertyValue, TextAlign};
