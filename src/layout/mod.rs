//! Layout engine: text measurement, greedy line breaking, taffy block stacking.

pub mod engine;
pub mod measure;
pub mod model;
pub mod stack;

pub use engine::{LayoutEngine, LayoutError};
pub use measure::{AdvanceMeasurer, MonospaceMeasurer, TextMeasure};
pub use model::{BlockLayout, Fragment, Layout, Line};
