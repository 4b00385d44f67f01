// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset transforms.
//!
//! Transforms are full-recompute `Dataset -> Dataset` operators. They preserve upstream
//! row keys so per-record identity survives filtering and sorting.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::table::{Dataset, SortState};

/// Sorting order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

/// Comparison operators for numeric predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==` (exact float equality)
    Eq,
    /// `!=` (exact float inequality)
    Ne,
}

/// A row predicate used by [`Transform::Filter`].
///
/// It supports a single numeric comparison against one field. Records missing the field
/// (or holding a non-numeric value) never match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Field to read.
    pub key: String,
    /// Comparison operator.
    pub op: CompareOp,
    /// Right-hand constant.
    pub value: f64,
}

impl Predicate {
    /// Creates a predicate.
    pub fn new(key: impl Into<String>, op: CompareOp, value: f64) -> Self {
        Self {
            key: key.into(),
            op,
            value,
        }
    }

    /// Evaluate the predicate for a given numeric value.
    pub fn eval(&self, v: f64) -> bool {
        match self.op {
            CompareOp::Lt => v < self.value,
            CompareOp::Le => v <= self.value,
            CompareOp::Gt => v > self.value,
            CompareOp::Ge => v >= self.value,
            CompareOp::Eq => v == self.value,
            CompareOp::Ne => v != self.value,
        }
    }

    /// Evaluate the predicate against a record.
    pub fn matches(&self, record: &Record) -> bool {
        record.f64(&self.key).is_some_and(|v| self.eval(v))
    }
}

/// A dataset transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// Keep only rows that satisfy a predicate.
    Filter(Predicate),
    /// Keep only rows whose category value for `key` is not listed in `hidden`.
    ///
    /// This is how legend toggles remove a series before geometry is rebuilt.
    Exclude {
        /// Field holding the category.
        key: String,
        /// Category keys to drop.
        hidden: Vec<String>,
    },
    /// Reorder rows by a field (stable; missing values last).
    Sort {
        /// Field used as the sort key.
        by: String,
        /// Sort order.
        order: SortOrder,
    },
    /// Keep only the listed fields in each record, in the listed order.
    Project {
        /// Fields to include in the output.
        keys: Vec<String>,
    },
}

impl Transform {
    /// Applies this transform, producing a new dataset.
    pub fn apply(&self, input: &Dataset) -> Dataset {
        let out = match self {
            Self::Filter(predicate) => {
                let rows: Vec<usize> = (0..input.row_count())
                    .filter(|&row| input.record(row).is_some_and(|r| predicate.matches(r)))
                    .collect();
                input.reordered(&rows)
            }
            Self::Exclude { key, hidden } => {
                let rows: Vec<usize> = (0..input.row_count())
                    .filter(|&row| {
                        input
                            .record(row)
                            .and_then(|r| r.category(key))
                            .is_none_or(|c| !hidden.contains(&c))
                    })
                    .collect();
                input.reordered(&rows)
            }
            Self::Sort { by, order } => {
                let state = SortState {
                    key: Some(by.clone()),
                    order: *order,
                };
                input.reordered(&state.sorted_rows(input))
            }
            Self::Project { keys } => {
                let records = input
                    .records()
                    .iter()
                    .map(|r| {
                        keys.iter().fold(Record::new(), |acc, k| match r.get(k) {
                            Some(v) => acc.with(k.clone(), v.clone()),
                            None => acc,
                        })
                    })
                    .collect();
                // Row keys and records have the same length by construction.
                Dataset::with_row_keys(input.row_keys().to_vec(), records).unwrap_or_default()
            }
        };
        tracing::trace!(
            rows_in = input.row_count(),
            rows_out = out.row_count(),
            "applied transform"
        );
        out
    }

    /// Applies a sequence of transforms in order.
    pub fn apply_all(transforms: &[Self], input: &Dataset) -> Dataset {
        transforms
            .iter()
            .fold(input.clone(), |data, t| t.apply(&data))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Record::new().with("cat", "a").with("v", 5.0),
            Record::new().with("cat", "b").with("v", 1.0),
            Record::new().with("cat", "a").with("v", 3.0),
            Record::new().with("cat", "c"),
        ])
    }

    #[test]
    fn filter_keeps_row_keys_and_skips_missing_values() {
        let out = Transform::Filter(Predicate::new("v", CompareOp::Ge, 3.0)).apply(&sample());
        assert_eq!(out.row_keys(), [0, 2]);
    }

    #[test]
    fn exclude_drops_hidden_categories() {
        let t = Transform::Exclude {
            key: "cat".into(),
            hidden: vec!["a".into()],
        };
        let out = t.apply(&sample());
        assert_eq!(out.row_keys(), [1, 3]);
    }

    #[test]
    fn sort_then_project() {
        let out = Transform::apply_all(
            &[
                Transform::Sort {
                    by: "v".into(),
                    order: SortOrder::Desc,
                },
                Transform::Project {
                    keys: vec!["v".into()],
                },
            ],
            &sample(),
        );
        assert_eq!(out.row_keys(), [0, 2, 1, 3]);
        assert!(out.records().iter().all(|r| r.get("cat").is_none()));
        assert!(out.record(3).is_some_and(Record::is_empty));
    }
}
