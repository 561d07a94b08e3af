//! Layout and view configuration.
//!
//! Both structs deserialize from partial JSON objects; missing fields take
//! their defaults.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Default content width in pixels.
pub const DEFAULT_CONTENT_WIDTH: f32 = 600.0;
/// Default line-height multiplier applied to the largest font size on a line.
pub const DEFAULT_LEADING: f32 = 1.2;

/// Errors from validating a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("content width must be positive and finite, got {0}")]
    InvalidWidth(f32),

    #[error("leading must be positive and finite, got {0}")]
    InvalidLeading(f32),
}

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

/// Parameters of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Width available to every block, padding included.
    pub content_width: f32,
    /// Line height = max font size on the line × leading.
    pub leading: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            content_width: DEFAULT_CONTENT_WIDTH,
            leading: DEFAULT_LEADING,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content width (builder).
    pub fn with_content_width(mut self, width: f32) -> Self {
        self.content_width = width;
        self
    }

    /// Set the leading factor (builder).
    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    /// Check that the width and leading are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.content_width.is_finite() || self.content_width <= 0.0 {
            return Err(ConfigError::InvalidWidth(self.content_width));
        }
        if !self.leading.is_finite() || self.leading <= 0.0 {
            return Err(ConfigError::InvalidLeading(self.leading));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ViewConfig
// ---------------------------------------------------------------------------

/// Configuration of a rich-text view: its viewport and the layout it runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f32,
    pub height: f32,
    pub layout: LayoutConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_WIDTH, DEFAULT_CONTENT_WIDTH)
    }
}

impl ViewConfig {
    /// A view of `width` × `height` whose layout width follows the view width.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            layout: LayoutConfig::default().with_content_width(width),
        }
    }

    /// Replace the layout configuration (builder).
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the leading factor of the layout (builder).
    pub fn with_leading(mut self, leading: f32) -> Self {
        self.layout.leading = leading;
        self
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
