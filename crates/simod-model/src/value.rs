//! Raw scalar values as they arrive from a tabular source.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A single cell of an event log row.
///
/// JSON sources keep their scalar kind so the filtered log can be handed back
/// unchanged; CSV sources only ever produce [`CellValue::Text`] and
/// [`CellValue::Missing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Missing,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Builds a text cell, treating blank text as missing.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(value)
        }
    }

    /// True for null cells and for text that is empty after trimming.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Text form used for identifiers and categorical comparisons.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Missing => Cow::Borrowed(""),
            Self::Bool(value) => Cow::Owned(value.to_string()),
            Self::Integer(value) => Cow::Owned(value.to_string()),
            Self::Float(value) => Cow::Owned(value.to_string()),
            Self::Text(value) => Cow::Borrowed(value.as_str()),
        }
    }

    /// Numeric interpretation, `None` when the cell is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite()),
            Self::Missing | Self::Bool(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}
