//! Polymorphic field values for dynamic sorting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A polymorphic field value that can hold different types
///
/// Used when the sort field of a listing query is only known at request
/// time: `Transaction::field` returns the named column as a `FieldValue`
/// and the store orders rows by comparing values of the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Compare two values of the same shape
    ///
    /// Strings compare case-insensitively (listing sorts are user-facing);
    /// numeric variants compare numerically, with NaN ordered first.
    /// Mismatched shapes compare equal so a mixed sort degrades to the
    /// incoming order instead of panicking.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Less)
            }
            (FieldValue::Integer(a), FieldValue::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Less)
            }
            (FieldValue::Float(a), FieldValue::Integer(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Greater)
            }
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}
