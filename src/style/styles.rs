//! PropertySet struct with typed `Option<T>` fields for every recognized property.
//!
//! This is the central style representation. `None` means "not set" (falls
//! through to the next cascade level). Unrecognized keys are kept verbatim in
//! [`PropertySet::extra`] and never reach layout.

use std::collections::BTreeMap;
use std::fmt;

use crate::style::color::Color;
use crate::style::properties::{PropertyError, PropertyKey};

/// Text alignment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }
}

/// Numeric font weight, 1..=1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    /// Whether this weight renders as bold (600 and above).
    pub fn is_bold(self) -> bool {
        self.0 >= 600
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

/// A single typed property value, as stored under a [`PropertyKey`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f32),
    Color(Color),
    Align(TextAlign),
    Style(FontStyle),
    Weight(FontWeight),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Number(n) => write!(f, "{n}"),
            PropertyValue::Color(c) => write!(f, "{c}"),
            PropertyValue::Align(a) => f.write_str(a.as_str()),
            PropertyValue::Style(s) => f.write_str(s.as_str()),
            PropertyValue::Weight(w) => write!(f, "{}", w.0),
        }
    }
}

/// A set of style properties. Each field is `Option<T>`; `None` means unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    // Font
    pub font_family: Option<String>,
    pub font_style: Option<FontStyle>,
    pub font_weight: Option<FontWeight>,
    pub font_size: Option<f32>,

    // Colors
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub border_color: Option<Color>,

    // Block
    pub text_align: Option<TextAlign>,
    pub block_padding: Option<f32>,

    /// Unrecognized keys with their raw textual value.
    pub extra: BTreeMap<String, String>,
}

impl PropertySet {
    /// The empty set, usable in `static` position.
    pub const EMPTY: PropertySet = PropertySet {
        font_family: None,
        font_style: None,
        font_weight: None,
        font_size: None,
        color: None,
        background_color: None,
        border_color: None,
        text_align: None,
        block_padding: None,
        extra: BTreeMap::new(),
    };

    /// Create a new `PropertySet` with all fields set to `None`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_block_padding(mut self, padding: f32) -> Self {
        self.block_padding = Some(padding);
        self
    }

    /// Read the value stored under `key`, if set.
    pub fn get(&self, key: PropertyKey) -> Option<PropertyValue> {
        match key {
            PropertyKey::FontFamily => self.font_family.clone().map(PropertyValue::Text),
            PropertyKey::FontStyle => self.font_style.map(PropertyValue::Style),
            PropertyKey::FontWeight => self.font_weight.map(PropertyValue::Weight),
            PropertyKey::FontSize => self.font_size.map(PropertyValue::Number),
            PropertyKey::Color => self.color.map(PropertyValue::Color),
            PropertyKey::BackgroundColor => self.background_color.map(PropertyValue::Color),
            PropertyKey::TextAlign => self.text_align.map(PropertyValue::Align),
            PropertyKey::BlockPadding => self.block_padding.map(PropertyValue::Number),
            PropertyKey::BorderColor => self.border_color.map(PropertyValue::Color),
        }
    }

    /// Store `value` under `key`.
    ///
    /// Fails with [`PropertyError::TypeMismatch`] if the value variant does not
    /// belong to the key; the set is left unchanged in that case.
    pub fn insert(&mut self, key: PropertyKey, value: PropertyValue) -> Result<(), PropertyError> {
        match (key, value) {
            (PropertyKey::FontFamily, PropertyValue::Text(s)) => self.font_family = Some(s),
            (PropertyKey::FontStyle, PropertyValue::Style(s)) => self.font_style = Some(s),
            (PropertyKey::FontWeight, PropertyValue::Weight(w)) => self.font_weight = Some(w),
            (PropertyKey::FontSize, PropertyValue::Number(n)) => self.font_size = Some(n),
            (PropertyKey::Color, PropertyValue::Color(c)) => self.color = Some(c),
            (PropertyKey::BackgroundColor, PropertyValue::Color(c)) => {
                self.background_color = Some(c)
            }
            (PropertyKey::TextAlign, PropertyValue::Align(a)) => self.text_align = Some(a),
            (PropertyKey::BlockPadding, PropertyValue::Number(n)) => self.block_padding = Some(n),
            (PropertyKey::BorderColor, PropertyValue::Color(c)) => self.border_color = Some(c),
            (key, value) => {
                return Err(PropertyError::TypeMismatch {
                    property: key.as_str().into(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Unset the value stored under `key`.
    pub fn remove(&mut self, key: PropertyKey) {
        match key {
            PropertyKey::FontFamily => self.font_family = None,
            PropertyKey::FontStyle => self.font_style = None,
            PropertyKey::FontWeight => self.font_weight = None,
            PropertyKey::FontSize => self.font_size = None,
            PropertyKey::Color => self.color = None,
            PropertyKey::BackgroundColor => self.background_color = None,
            PropertyKey::TextAlign => self.text_align = None,
            PropertyKey::BlockPadding => self.block_padding = None,
            PropertyKey::BorderColor => self.border_color = None,
        }
    }

    /// Iterate the recognized properties that are set, in [`PropertyKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, PropertyValue)> + '_ {
        PropertyKey::ALL
            .iter()
            .filter_map(move |&key| self.get(key).map(|value| (key, value)))
    }

    /// Merge `other` on top of `self`. For each field, if `other` has a value
    /// (`Some`), use it; otherwise keep `self`'s value. Extra keys are merged the
    /// same way, `other` winning on conflicts.
    pub fn merge(&self, other: &PropertySet) -> PropertySet {
        fn merge_opt<T: Clone>(base: &Option<T>, other: &Option<T>) -> Option<T> {
            if other.is_some() {
                other.clone()
            } else {
                base.clone()
            }
        }

        let mut extra = self.extra.clone();
        extra.extend(other.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        PropertySet {
            font_family: merge_opt(&self.font_family, &other.font_family),
            font_style: merge_opt(&self.font_style, &other.font_style),
            font_weight: merge_opt(&self.font_weight, &other.font_weight),
            font_size: merge_opt(&self.font_size, &other.font_size),
            color: merge_opt(&self.color, &other.color),
            background_color: merge_opt(&self.background_color, &other.background_color),
            border_color: merge_opt(&self.border_color, &other.border_color),
            text_align: merge_opt(&self.text_align, &other.text_align),
            block_padding: merge_opt(&self.block_padding, &other.block_padding),
            extra,
        }
    }

    /// Returns `true` if no recognized property and no extra key is set.
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && self.font_style.is_none()
            && self.font_weight.is_none()
            && self.font_size.is_none()
            && self.color.is_none()
            && self.background_color.is_none()
            && self.border_color.is_none()
            && self.text_align.is_none()
            && self.block_padding.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        assert!(PropertySet::new().is_empty());
        assert!(PropertySet::EMPTY.is_empty());
        assert_eq!(PropertySet::EMPTY, PropertySet::default());
    }

    #[test]
    fn extra_key_makes_set_non_empty() {
        let mut s = PropertySet::new();
        s.extra.insert("letter-spacing".into(), "2".into());
        assert!(!s.is_empty());
    }

    #[test]
    fn merge_other_overrides_base() {
        let base = PropertySet::new()
            .with_color(Color::BLACK)
            .with_background_color(Color::WHITE);
        let other = PropertySet::new().with_color(Color::rgb(255, 0, 0));

        let merged = base.merge(&other);
        assert_eq!(merged.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(merged.background_color, Some(Color::WHITE));
    }

    #[test]
    fn merge_is_not_commutative() {
        let a = PropertySet::new().with_font_size(10.0);
        let b = PropertySet::new().with_font_size(20.0);
        assert_eq!(a.merge(&b).font_size, Some(20.0));
        assert_eq!(b.merge(&a).font_size, Some(10.0));
    }

    #[test]
    fn merge_extra_keys() {
        let mut a = PropertySet::new();
        a.extra.insert("x".into(), "1".into());
        a.extra.insert("y".into(), "1".into());
        let mut b = PropertySet::new();
        b.extra.insert("y".into(), "2".into());

        let merged = a.merge(&b);
        assert_eq!(merged.extra.get("x").map(String::as_str), Some("1"));
        assert_eq!(merged.extra.get("y").map(String::as_str), Some("2"));
    }

    #[test]
    fn insert_and_get_round_trip_every_key() {
        let mut s = PropertySet::new();
        s.insert(PropertyKey::FontFamily, PropertyValue::Text("source".into())).unwrap();
        s.insert(PropertyKey::FontStyle, PropertyValue::Style(FontStyle::Italic)).unwrap();
        s.insert(PropertyKey::FontWeight, PropertyValue::Weight(FontWeight::BOLD)).unwrap();
        s.insert(PropertyKey::FontSize, PropertyValue::Number(15.0)).unwrap();
        s.insert(PropertyKey::Color, PropertyValue::Color(Color::BLACK)).unwrap();
        s.insert(PropertyKey::BackgroundColor, PropertyValue::Color(Color::WHITE)).unwrap();
        s.insert(PropertyKey::TextAlign, PropertyValue::Align(TextAlign::Center)).unwrap();
        s.insert(PropertyKey::BlockPadding, PropertyValue::Number(10.0)).unwrap();
        s.insert(PropertyKey::BorderColor, PropertyValue::Color(Color::BLACK)).unwrap();

        assert_eq!(s.iter().count(), PropertyKey::ALL.len());
        assert_eq!(s.get(PropertyKey::FontSize), Some(PropertyValue::Number(15.0)));
        assert_eq!(s.get(PropertyKey::TextAlign), Some(PropertyValue::Align(TextAlign::Center)));
    }

    #[test]
    fn insert_type_mismatch_leaves_set_unchanged() {
        let mut s = PropertySet::new();
        let err = s
            .insert(PropertyKey::FontSize, PropertyValue::Color(Color::BLACK))
            .unwrap_err();
        assert!(matches!(err, PropertyError::TypeMismatch { .. }));
        assert!(s.is_empty());
    }

    #[test]
    fn remove_unsets_value() {
        let mut s = PropertySet::new().with_block_padding(4.0);
        s.remove(PropertyKey::BlockPadding);
        assert!(s.is_empty());
    }

    #[test]
    fn font_weight_bold_threshold() {
        assert!(!FontWeight::NORMAL.is_bold());
        assert!(FontWeight(600).is_bold());
        assert!(FontWeight::BOLD.is_bold());
    }
}
