//! Two-level style cascade: span over block over engine defaults.
//!
//! Resolution is a pure function of the style sheet and the two style-name
//! references. The output is fully populated; layout never sees an unset
//! property and never consults the registry itself.

use crate::style::color::Color;
use crate::style::registry::StyleSheet;
use crate::style::styles::{FontStyle, FontWeight, PropertySet, TextAlign};

/// Built-in font family used when no style sets one.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
/// Built-in font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// A fully resolved set of properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub font_family: String,
    pub font_style: FontStyle,
    pub font_weight: FontWeight,
    pub font_size: f32,
    pub color: Color,
    pub background_color: Color,
    pub border_color: Color,
    pub text_align: TextAlign,
    pub block_padding: f32,
}

impl Default for ResolvedStyle {
    /// The engine defaults.
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_style: FontStyle::Normal,
            font_weight: FontWeight::NORMAL,
            font_size: DEFAULT_FONT_SIZE,
            color: Color::BLACK,
            background_color: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
            text_align: TextAlign::Left,
            block_padding: 0.0,
        }
    }
}

impl ResolvedStyle {
    /// Fill every property from `set`, falling back to the engine defaults.
    pub fn from_set(set: &PropertySet) -> Self {
        let defaults = ResolvedStyle::default();
        Self {
            font_family: set.font_family.clone().unwrap_or(defaults.font_family),
            font_style: set.font_style.unwrap_or(defaults.font_style),
            font_weight: set.font_weight.unwrap_or(defaults.font_weight),
            font_size: set.font_size.unwrap_or(defaults.font_size),
            color: set.color.unwrap_or(defaults.color),
            background_color: set.background_color.unwrap_or(defaults.background_color),
            border_color: set.border_color.unwrap_or(defaults.border_color),
            text_align: set.text_align.unwrap_or(defaults.text_align),
            block_padding: set.block_padding.unwrap_or(defaults.block_padding),
        }
    }
}

/// Resolve a block's own style: its style name over the defaults.
pub fn resolve_block(sheet: &StyleSheet, block_style: Option<&str>) -> ResolvedStyle {
    ResolvedStyle::from_set(sheet.lookup(block_style))
}

/// Resolve a span's style: span style name, then block style name, then defaults.
pub fn resolve_span(
    sheet: &StyleSheet,
    block_style: Option<&str>,
    span_style: Option<&str>,
) -> ResolvedStyle {
    let merged = sheet.lookup(block_style).merge(sheet.lookup(span_style));
    ResolvedStyle::from_set(&merged)
}
