// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schema-less records.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::date::format_iso_date;

/// A single field value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// A UTC timestamp in milliseconds since the Unix epoch.
    Date(i64),
}

impl Value {
    /// Parses `text` as a number if possible, otherwise keeps it as text.
    ///
    /// This matches how edited data-table cells are stored.
    pub fn parse_number(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Number(v),
            _ => Self::Text(text.to_string()),
        }
    }

    /// Returns the numeric value used for continuous scales.
    ///
    /// Dates map to their millisecond timestamp. Text never maps to a number here; use
    /// [`Value::to_number_lenient`] for statistics over user-edited cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            #[allow(
                clippy::cast_precision_loss,
                reason = "millisecond timestamps are well within the exact f64 range"
            )]
            Self::Date(ms) => Some(*ms as f64),
            _ => None,
        }
    }

    /// Like [`Value::as_f64`], but also parses numeric text.
    pub fn to_number_lenient(&self) -> Option<f64> {
        match self {
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => self.as_f64(),
        }
    }

    /// Returns the string slice for text values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the key used when this value is treated as a category.
    ///
    /// Numbers use their display form, dates use `YYYY-MM-DD`.
    pub fn category_key(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Date(ms) => format_iso_date(*ms),
            Self::Number(_) => self.to_string(),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Date(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Total ordering used by table sorting.
    ///
    /// Numbers sort before dates, dates before text; `NaN` sorts last among numbers.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "only used when the value is integral and within the i64 range"
                )]
                let int = *v as i64;
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "comparison detects whether the value is integral"
                )]
                let integral = v.is_finite() && v.abs() < 1e15 && int as f64 == *v;
                if integral {
                    write!(f, "{int}")
                } else {
                    write!(f, "{v}")
                }
            }
            Self::Text(s) => f.write_str(s),
            Self::Date(ms) => f.write_str(&format_iso_date(*ms)),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An ordered mapping from field name to [`Value`].
///
/// Field order is insertion order; radar charts use it to derive their feature axes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a field, returning the previous value if the field existed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            return Some(core::mem::replace(slot, value));
        }
        self.fields.push((key, value));
        None
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the numeric value for `key` (see [`Value::as_f64`]).
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Returns the category key for `key` (see [`Value::category_key`]).
    pub fn category(&self, key: &str) -> Option<String> {
        self.get(key).map(Value::category_key)
    }

    /// Iterates field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn set_replaces_in_place_and_keeps_order() {
        let mut r = Record::new().with("name", "a").with("x", 1.0);
        assert_eq!(r.set("name", "b"), Some(Value::from("a")));
        let keys: Vec<_> = r.keys().collect();
        assert_eq!(keys, ["name", "x"]);
    }

    #[test]
    fn numbers_display_like_integers_when_integral() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-0.0).category_key(), "0");
    }

    #[test]
    fn parse_number_falls_back_to_text() {
        assert_eq!(Value::parse_number(" 42 "), Value::Number(42.0));
        assert_eq!(Value::parse_number("abc"), Value::Text("abc".to_string()));
        assert_eq!(Value::parse_number("NaN"), Value::Text("NaN".to_string()));
    }

    #[test]
    fn text_is_not_numeric_unless_lenient() {
        let v = Value::from("12.5");
        assert_eq!(v.as_f64(), None);
        assert_eq!(v.to_number_lenient(), Some(12.5));
    }

    #[test]
    fn sort_cmp_orders_across_types() {
        let mut values = vec![
            Value::from("b"),
            Value::Date(5),
            Value::Number(2.0),
            Value::from("a"),
            Value::Number(-1.0),
        ];
        values.sort_by(Value::sort_cmp);
        assert_eq!(
            values,
            [
                Value::Number(-1.0),
                Value::Number(2.0),
                Value::Date(5),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }
}
