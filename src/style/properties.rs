//! Property parsing: raw values → typed property values.
//!
//! Raw values arrive either from the JSON style surface (numbers and strings)
//! or from sheet text (identifiers, strings, numbers, dimensions, hex colors).
//! Both are normalized to [`RawValue`] and parsed into the typed fields on
//! [`crate::style::styles::PropertySet`].

use std::fmt;
use std::str::FromStr;

use crate::style::color::parse_color;
use crate::style::styles::{FontStyle, FontWeight, PropertySet, PropertyValue, TextAlign};

/// Errors from property parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
    #[error("value {value} does not belong to property {property}")]
    TypeMismatch { property: String, value: String },
}

/// The closed set of properties the layout engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKey {
    FontFamily,
    FontStyle,
    FontWeight,
    FontSize,
    Color,
    BackgroundColor,
    TextAlign,
    BlockPadding,
    BorderColor,
}

impl PropertyKey {
    pub const ALL: [PropertyKey; 9] = [
        PropertyKey::FontFamily,
        PropertyKey::FontStyle,
        PropertyKey::FontWeight,
        PropertyKey::FontSize,
        PropertyKey::Color,
        PropertyKey::BackgroundColor,
        PropertyKey::TextAlign,
        PropertyKey::BlockPadding,
        PropertyKey::BorderColor,
    ];

    /// The property's name as written in style definitions.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKey::FontFamily => "font-family",
            PropertyKey::FontStyle => "font-style",
            PropertyKey::FontWeight => "font-weight",
            PropertyKey::FontSize => "font-size",
            PropertyKey::Color => "color",
            PropertyKey::BackgroundColor => "background-color",
            PropertyKey::TextAlign => "text-align",
            PropertyKey::BlockPadding => "block-padding",
            PropertyKey::BorderColor => "border-color",
        }
    }

    /// Parse a raw value into the typed value this key stores.
    pub fn parse_value(self, raw: &RawValue) -> Result<PropertyValue, PropertyError> {
        let property = self.as_str();
        match self {
            PropertyKey::FontFamily => match raw {
                RawValue::Text(s) if !s.trim().is_empty() => {
                    Ok(PropertyValue::Text(s.trim().to_owned()))
                }
                other => Err(invalid(property, format!("expected a family name, got: {other}"))),
            },
            PropertyKey::FontStyle => {
                let name = require_text(raw, property)?;
                Ok(PropertyValue::Style(match name {
                    "normal" => FontStyle::Normal,
                    "italic" => FontStyle::Italic,
                    "oblique" => FontStyle::Oblique,
                    other => {
                        return Err(invalid(
                            property,
                            format!("expected normal|italic|oblique, got: {other}"),
                        ));
                    }
                }))
            }
            PropertyKey::FontWeight => parse_font_weight(raw).map(PropertyValue::Weight),
            PropertyKey::FontSize | PropertyKey::BlockPadding => {
                parse_length(raw, property).map(PropertyValue::Number)
            }
            PropertyKey::Color | PropertyKey::BackgroundColor | PropertyKey::BorderColor => {
                let text = require_text(raw, property)?;
                parse_color(text)
                    .map(PropertyValue::Color)
                    .ok_or_else(|| invalid(property, format!("unknown color: {text}")))
            }
            PropertyKey::TextAlign => {
                let name = require_text(raw, property)?;
                Ok(PropertyValue::Align(match name {
                    "left" => TextAlign::Left,
                    "center" => TextAlign::Center,
                    "right" => TextAlign::Right,
                    other => {
                        return Err(invalid(
                            property,
                            format!("expected left|center|right, got: {other}"),
                        ));
                    }
                }))
            }
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or(())
    }
}

/// An untyped property value as written in a style definition.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f32),
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f32> for RawValue {
    fn from(n: f32) -> Self {
        RawValue::Number(n)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n as f32)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

fn invalid(property: &str, message: String) -> PropertyError {
    PropertyError::InvalidValue {
        property: property.into(),
        message,
    }
}

/// Extract a trimmed string from a raw value, returning an error using the given property name.
fn require_text<'a>(raw: &'a RawValue, property: &str) -> Result<&'a str, PropertyError> {
    match raw {
        RawValue::Text(s) => Ok(s.trim()),
        RawValue::Number(n) => Err(invalid(property, format!("expected identifier, got number {n}"))),
    }
}

/// Parse a non-negative length: a number, a numeric string, or a `px` string.
fn parse_length(raw: &RawValue, property: &str) -> Result<f32, PropertyError> {
    let value = match raw {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let s = s.trim();
            let digits = s.strip_suffix("px").unwrap_or(s).trim_end();
            digits
                .parse::<f32>()
                .map_err(|_| invalid(property, format!("expected a length, got: {s}")))?
        }
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            property,
            format!("expected a non-negative length, got: {value}"),
        ));
    }
    Ok(value)
}

/// Parse a font weight: numeric (`700`, `"700"`) or `normal`/`bold`.
fn parse_font_weight(raw: &RawValue) -> Result<FontWeight, PropertyError> {
    let property = PropertyKey::FontWeight.as_str();
    let value = match raw {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => match s.trim() {
            "normal" => return Ok(FontWeight::NORMAL),
            "bold" => return Ok(FontWeight::BOLD),
            other => other
                .parse::<f32>()
                .map_err(|_| invalid(property, format!("expected 1-1000|normal|bold, got: {other}")))?,
        },
    };
    if value.fract() != 0.0 || !(1.0..=1000.0).contains(&value) {
        return Err(invalid(property, format!("expected an integer in 1-1000, got: {value}")));
    }
    Ok(FontWeight(value as u16))
}

/// Apply a declaration (property name + raw value) to a mutable [`PropertySet`].
///
/// Recognized properties are parsed into their typed field. Unrecognized property
/// names are kept verbatim in [`PropertySet::extra`] and never fail.
pub fn apply_declaration(
    set: &mut PropertySet,
    property: &str,
    raw: &RawValue,
) -> Result<(), PropertyError> {
    match property.parse::<PropertyKey>() {
        Ok(key) => {
            let value = key.parse_value(raw)?;
            set.insert(key, value)
        }
        Err(()) => {
            set.extra.insert(property.to_owned(), raw.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::color::Color;

    fn apply(property: &str, raw: impl Into<RawValue>) -> Result<PropertySet, PropertyError> {
        let mut set = PropertySet::new();
        apply_declaration(&mut set, property, &raw.into())?;
        Ok(set)
    }

    #[test]
    fn key_names_round_trip() {
        for key in PropertyKey::ALL {
            assert_eq!(key.as_str().parse::<PropertyKey>(), Ok(key));
        }
        assert!("letter-spacing".parse::<PropertyKey>().is_err());
    }

    #[test]
    fn font_size_accepts_number_string_and_px() {
        assert_eq!(apply("font-size", 15.0).unwrap().font_size, Some(15.0));
        assert_eq!(apply("font-size", "15").unwrap().font_size, Some(15.0));
        assert_eq!(apply("font-size", "15px").unwrap().font_size, Some(15.0));
    }

    #[test]
    fn negative_length_rejected() {
        let err = apply("block-padding", -1.0).unwrap_err();
        assert!(matches!(err, PropertyError::InvalidValue { ref property, .. } if property == "block-padding"));
    }

    #[test]
    fn font_weight_variants() {
        assert_eq!(apply("font-weight", "700").unwrap().font_weight, Some(FontWeight(700)));
        assert_eq!(apply("font-weight", 400.0).unwrap().font_weight, Some(FontWeight(400)));
        assert_eq!(apply("font-weight", "bold").unwrap().font_weight, Some(FontWeight::BOLD));
        assert!(apply("font-weight", "heavy").is_err());
        assert!(apply("font-weight", 1500.0).is_err());
        assert!(apply("font-weight", 450.5).is_err());
    }

    #[test]
    fn font_style_and_align() {
        assert_eq!(apply("font-style", "italic").unwrap().font_style, Some(FontStyle::Italic));
        assert_eq!(apply("text-align", "right").unwrap().text_align, Some(TextAlign::Right));
        assert!(apply("text-align", "justify").is_err());
        assert!(apply("font-style", 3.0).is_err());
    }

    #[test]
    fn colors_parse() {
        assert_eq!(apply("color", "#000000").unwrap().color, Some(Color::BLACK));
        assert_eq!(
            apply("background-color", "#ccffee").unwrap().background_color,
            Some(Color::rgb(0xcc, 0xff, 0xee))
        );
        assert!(apply("border-color", "not-a-color").is_err());
    }

    #[test]
    fn font_family_requires_text() {
        assert_eq!(
            apply("font-family", "source").unwrap().font_family.as_deref(),
            Some("source")
        );
        assert!(apply("font-family", "  ").is_err());
        assert!(apply("font-family", 12.0).is_err());
    }

    #[test]
    fn unknown_property_kept_opaquely() {
        let set = apply("letter-spacing", 2.0).unwrap();
        assert_eq!(set.extra.get("letter-spacing").map(String::as_str), Some("2"));
        assert_eq!(set.iter().count(), 0);
    }
}
