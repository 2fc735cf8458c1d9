//! Row-oriented data for Grammar of Graphics layers.
//!
//! A [`Row`] maps field names to [`DataValue`]s. Rows are read-only from the
//! charting core's point of view: aesthetics look values up, geoms never
//! modify them.

use std::collections::HashMap;

/// A value in a data row.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A raw value paired with the text shown to users.
    Labeled {
        /// The underlying value used for scaling.
        value: Box<DataValue>,
        /// Display text, if different from the value.
        display: Option<String>,
    },
    /// A missing value.
    Null,
}

impl DataValue {
    /// Pair a value with its display text.
    #[must_use]
    pub fn labeled(value: impl Into<DataValue>, display: impl Into<String>) -> Self {
        DataValue::Labeled {
            value: Box::new(value.into()),
            display: Some(display.into()),
        }
    }

    /// Get as f32, or None if not a number. Text is never coerced.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) if n.is_finite() => Some(*n),
            DataValue::Labeled { value, .. } => value.as_f32(),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            DataValue::Labeled { value, .. } => value.as_str(),
            _ => None,
        }
    }

    /// Whether this value is missing (including a labeled null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            DataValue::Null => true,
            DataValue::Number(n) => !n.is_finite(),
            DataValue::Labeled { value, .. } => value.is_null(),
            DataValue::Text(_) => false,
        }
    }

    /// Whether this value is numeric.
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.as_f32().is_some()
    }

    /// Categorical key: the underlying value rendered as text.
    #[must_use]
    pub fn key(&self) -> Option<String> {
        match self {
            DataValue::Number(n) if n.is_finite() => Some(if *n == n.round() && n.abs() < 1e9 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }),
            DataValue::Text(s) => Some(s.clone()),
            DataValue::Labeled { value, .. } => value.key(),
            _ => None,
        }
    }

    /// Text shown to users: the display text if present, else the key.
    #[must_use]
    pub fn display(&self) -> Option<String> {
        match self {
            DataValue::Labeled {
                display: Some(d), ..
            } => Some(d.clone()),
            other => other.key(),
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v as f32)
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        DataValue::Number(v as f32)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DataValue::Null, Into::into)
    }
}

/// One data record: field name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, DataValue>,
}

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<DataValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.fields.get(name)
    }

    /// Look up a numeric field.
    #[must_use]
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(DataValue::as_f32)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<DataValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
