//! Decoded field values and rows

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One decoded field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Empty field, or the tool's null marker
    Missing,
    /// Value no coercion applied to, kept verbatim
    Text(String),
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Missing => "missing",
            FieldValue::Text(_) => "text",
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            FieldValue::Missing => Ok(()),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Decoded values of one output line, in column-list order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypedRow {
    values: Vec<FieldValue>,
}

impl TypedRow {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn get(&self, position: usize) -> Option<&FieldValue> {
        self.values.get(position)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A new row with `inserted` placed starting at `position`
    pub fn with_inserted(&self, position: usize, inserted: Vec<FieldValue>) -> Self {
        let mut values = self.values.clone();
        let tail = values.split_off(position.min(values.len()));
        values.extend(inserted);
        values.extend(tail);
        Self { values }
    }

    pub fn into_values(self) -> Vec<FieldValue> {
        self.values
    }
}

impl std::ops::Index<usize> for TypedRow {
    type Output = FieldValue;

    fn index(&self, position: usize) -> &Self::Output {
        &self.values[position]
    }
}
