//! Style value types.
//!
//! A style map is an ordered mapping from property names to values, where a
//! value may itself be a nested map scoped under a pseudo-selector or media
//! query.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_styled::prelude::*;
//!
//! let style = StyleMap::new()
//!     .with("backgroundColor", "lightblue")
//!     .with("fontSize", 12)
//!     .with("transform", vec!["scale(1)", "scale(1.1)"])
//!     .with(":hover", StyleMap::new().with("color", "blue"));
//!
//! assert_eq!(style.len(), 4);
//! assert_eq!(style.get("fontSize").and_then(StyleValue::primitive_text).as_deref(), Some("12"));
//! ```

use std::borrow::Cow;
use std::path::Path;

use indexmap::IndexMap;

use crate::{Error, Result};

/// Reserved key carrying a literal class name to append to the generated one.
pub const ADD_CLASS_KEY: &str = "addClass";

/// A single value inside a style map.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StyleValue {
    /// An absent value (skipped during injection).
    #[default]
    Null,
    /// A boolean (skipped during injection).
    Bool(bool),
    /// A numeric value such as `12` or `0.5`.
    Number(f64),
    /// A textual value such as `"red"` or `"12px"`.
    String(String),
    /// Several values for one property, emitted as fallbacks.
    Array(Vec<StyleValue>),
    /// A nested map, meaningful under `:pseudo` and `@media` keys.
    Map(StyleMap),
}

impl StyleValue {
    /// Check if this is a string or number.
    pub fn is_primitive(&self) -> bool {
        matches!(self, StyleValue::String(_) | StyleValue::Number(_))
    }

    /// Render a primitive value as CSS text.
    ///
    /// Returns `None` for anything that is not a string or number.
    pub fn primitive_text(&self) -> Option<Cow<'_, str>> {
        match self {
            StyleValue::String(s) => Some(Cow::Borrowed(s.as_str())),
            StyleValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            _ => None,
        }
    }

    /// Get the string slice if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the nested map if this is a map.
    pub fn as_map(&self) -> Option<&StyleMap> {
        match self {
            StyleValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get the entries if this is an array.
    pub fn as_array(&self) -> Option<&[StyleValue]> {
        match self {
            StyleValue::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Loose truthiness: null, `false`, zero, NaN and `""` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            StyleValue::Null => false,
            StyleValue::Bool(b) => *b,
            StyleValue::Number(n) => *n != 0.0 && !n.is_nan(),
            StyleValue::String(s) => !s.is_empty(),
            StyleValue::Array(_) | StyleValue::Map(_) => true,
        }
    }

    /// Short name of the value's shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            StyleValue::Null => "null",
            StyleValue::Bool(_) => "bool",
            StyleValue::Number(_) => "number",
            StyleValue::String(_) => "string",
            StyleValue::Array(_) => "array",
            StyleValue::Map(_) => "map",
        }
    }
}

/// Shortest round-trip text for a number as used in CSS values.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, use exponent notation
/// with an explicit sign (`1e+21`, `1.5e-7`); negative zero renders as `0`.
fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) && !n.is_nan() {
        let scientific = format!("{n:e}");
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => scientific,
        };
    }
    n.to_string()
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::String(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::String(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<StyleMap> for StyleValue {
    fn from(value: StyleMap) -> Self {
        StyleValue::Map(value)
    }
}

impl<T: Into<StyleValue>> From<Vec<T>> for StyleValue {
    fn from(values: Vec<T>) -> Self {
        StyleValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for StyleValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => StyleValue::Null,
            Value::Bool(b) => StyleValue::Bool(b),
            Value::Number(n) => n.as_f64().map_or(StyleValue::Null, StyleValue::Number),
            Value::String(s) => StyleValue::String(s),
            Value::Array(values) => {
                StyleValue::Array(values.into_iter().map(StyleValue::from).collect())
            }
            Value::Object(object) => StyleValue::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (k, StyleValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// An insertion-ordered mapping of style keys to values.
///
/// Keys are CSS property names (camel case or hyphenated), pseudo-selectors
/// starting with `:`, media queries starting with `@media`, or the reserved
/// [`ADD_CLASS_KEY`]. Overwriting a key keeps its original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleMap {
    entries: IndexMap<String, StyleValue>,
}

impl StyleMap {
    /// Create an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one for that key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.entries.shift_remove(key)
    }

    /// Shallow-merge another map into this one.
    ///
    /// Keys from `other` overwrite existing keys; nested maps are replaced,
    /// not merged.
    pub fn extend_from(&mut self, other: &StyleMap) {
        for (key, value) in other.iter() {
            self.entries.insert(key.to_string(), value.clone());
        }
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a style map from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        match StyleValue::from(value) {
            StyleValue::Map(map) => Ok(map),
            other => Err(Error::invalid_style(format!(
                "expected a JSON object at the root, found {}",
                other.kind()
            ))),
        }
    }

    /// Load a style map from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&content)
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
