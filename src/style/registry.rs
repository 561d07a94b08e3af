//! Style registry: named property sets with O(1) lookup.
//!
//! A [`StyleSheet`] maps style names to [`PropertySet`]s. Blocks and spans refer
//! to styles by name only; a name with no definition resolves to the empty set,
//! never to an error.

use std::collections::{BTreeMap, HashMap};

use crate::style::parser::{parse_sheet, ParseError};
use crate::style::properties::{apply_declaration, PropertyError, RawValue};
use crate::style::styles::PropertySet;

static EMPTY_SET: PropertySet = PropertySet::EMPTY;

/// Errors from loading style definitions.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("style `{style}`: {source}")]
    Property {
        style: String,
        #[source]
        source: PropertyError,
    },
    #[error("style `{style}`: property `{property}` must be a string or a number")]
    UnsupportedJsonValue { style: String, property: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("invalid style json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named mapping from style names to property sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    styles: HashMap<String, PropertySet>,
}

impl StyleSheet {
    /// Create an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the style `name`. Returns the previous definition.
    pub fn define(&mut self, name: impl Into<String>, set: PropertySet) -> Option<PropertySet> {
        self.styles.insert(name.into(), set)
    }

    /// Parse `(property, value)` pairs and define the result as `name`.
    ///
    /// On error the sheet is left unchanged.
    pub fn define_raw<'a, I>(&mut self, name: &str, declarations: I) -> Result<(), StyleError>
    where
        I: IntoIterator<Item = (&'a str, RawValue)>,
    {
        let mut set = PropertySet::new();
        for (property, raw) in declarations {
            apply_declaration(&mut set, property, &raw).map_err(|source| StyleError::Property {
                style: name.to_owned(),
                source,
            })?;
        }
        self.define(name, set);
        Ok(())
    }

    /// Look up a style by name.
    pub fn get(&self, name: &str) -> Option<&PropertySet> {
        self.styles.get(name)
    }

    /// Look up an optional style reference. Missing names and `None` give the
    /// empty set.
    pub fn lookup(&self, name: Option<&str>) -> &PropertySet {
        name.and_then(|n| self.styles.get(n)).unwrap_or(&EMPTY_SET)
    }

    /// Remove a style definition.
    pub fn remove(&mut self, name: &str) -> Option<PropertySet> {
        self.styles.remove(name)
    }

    /// Whether a style with this name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Defined style names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Define every style of `other` in this sheet, overwriting on conflict.
    pub fn merge_from(&mut self, other: &StyleSheet) {
        for (name, set) in &other.styles {
            self.styles.insert(name.clone(), set.clone());
        }
    }

    /// Parse style sheet text (`name { key: value; ... }`).
    pub fn parse(input: &str) -> Result<Self, StyleError> {
        let rules = parse_sheet(input)?;
        let mut sheet = StyleSheet::new();
        for rule in rules {
            sheet.define_raw(
                &rule.name,
                rule.declarations
                    .iter()
                    .map(|d| (d.property.as_str(), d.value.clone())),
            )?;
        }
        Ok(sheet)
    }

    /// Load a JSON mapping literal: `{ "name": { "property": value, ... }, ... }`.
    ///
    /// Property values must be strings or numbers. Styles are defined in sorted
    /// name order, so the outcome is independent of the input's key order.
    pub fn from_json(input: &str) -> Result<Self, StyleError> {
        let raw: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
            serde_json::from_str(input)?;
        let mut sheet = StyleSheet::new();
        for (name, properties) in &raw {
            let mut declarations = Vec::with_capacity(properties.len());
            for (property, value) in properties {
                let raw_value = match value {
                    serde_json::Value::String(s) => RawValue::Text(s.clone()),
                    serde_json::Value::Number(n) => match n.as_f64() {
                        Some(f) => RawValue::from(f),
                        None => {
                            return Err(StyleError::UnsupportedJsonValue {
                                style: name.clone(),
                                property: property.clone(),
                            })
                        }
                    },
                    _ => {
                        return Err(StyleError::UnsupportedJsonValue {
                            style: name.clone(),
                            property: property.clone(),
                        })
                    }
                };
                declarations.push((property.as_str(), raw_value));
            }
            sheet.define_raw(name, declarations)?;
        }
        Ok(sheet)
    }
}
