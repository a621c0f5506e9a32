//! Field value types used for dynamic, null-safe field access

use chrono::{DateTime, Utc};

/// A borrowed, polymorphic field value read from a record
///
/// Returned by [`Record::field_value`](crate::core::Record::field_value).
/// Text is borrowed so facet evaluation and sorting never clone item data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

impl<'a> FieldValue<'a> {
    /// Get the value as text if possible
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number; integers widen to `f64`
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a timestamp if possible
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Case-sensitive equality against a selector value
    ///
    /// Numeric fields compare against the parsed selector, so a `stock`
    /// selector of `"0"` matches an integer field holding `0`.
    pub fn equals(&self, expected: &str) -> bool {
        match self {
            FieldValue::Text(s) => *s == expected,
            FieldValue::Integer(i) => expected.trim().parse::<i64>().is_ok_and(|v| v == *i),
            FieldValue::Number(n) => expected.trim().parse::<f64>().is_ok_and(|v| v == *n),
            FieldValue::Timestamp(_) => false,
        }
    }

    /// Case-insensitive substring test; `needle` must already be lowercase
    pub fn contains_folded(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(s) => s.to_lowercase().contains(needle),
            _ => false,
        }
    }
}
