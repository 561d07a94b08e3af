//! Text width hints.
//!
//! The layout engine never shapes glyphs. It asks a [`TextMeasure`] for the
//! advance width of a run of text in a resolved style and breaks lines on
//! those numbers.

use crate::style::cascade::ResolvedStyle;
use crate::style::styles::FontStyle;

/// Measures the advance width of a run of text in pixels.
pub trait TextMeasure: Send + Sync {
    /// Width of `text` rendered in `style`. Must be deterministic.
    fn measure(&self, text: &str, style: &ResolvedStyle) -> f32;
}

/// Per-character advance estimate scaled by font size.
///
/// Characters are bucketed into a handful of width classes; monospace
/// families use one advance for everything. Bold and italic text is slightly
/// wider.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvanceMeasurer;

impl AdvanceMeasurer {
    fn em_width(ch: char) -> f32 {
        match ch {
            ' ' | '\u{a0}' => 0.25,
            '\t' => 1.0,
            'i' | 'l' | 'j' | 't' | 'f' | 'r' | '.' | ',' | ';' | ':' | '\'' | '!' | '|'
            | '(' | ')' | '[' | ']' => 0.28,
            'm' | 'w' | 'M' | 'W' | '@' => 0.8,
            c if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.65,
            c if c.is_ascii() => 0.5,
            // CJK and other wide scripts.
            c if c as u32 >= 0x1100 => 1.0,
            _ => 0.55,
        }
    }

    fn is_monospace(family: &str) -> bool {
        let family = family.to_ascii_lowercase();
        family.contains("mono") || family.contains("code") || family.contains("courier")
    }
}

impl TextMeasure for AdvanceMeasurer {
    fn measure(&self, text: &str, style: &ResolvedStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let em_sum: f32 = if Self::is_monospace(&style.font_family) {
            text.chars().count() as f32 * 0.6
        } else {
            text.chars().map(Self::em_width).sum()
        };

        let mut scale = 1.0;
        if style.font_weight.is_bold() {
            scale += 0.05;
        }
        if style.font_style != FontStyle::Normal {
            scale += 0.01;
        }
        em_sum * style.font_size * scale
    }
}

/// Every character advances by `advance` em, whatever the style.
///
/// Useful for character-grid surfaces and for predictable arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance: f32,
}

impl MonospaceMeasurer {
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasure for MonospaceMeasurer {
    fn measure(&self, text: &str, style: &ResolvedStyle) -> f32 {
        text.chars().count() as f32 * self.advance * style.font_size
    }
}
