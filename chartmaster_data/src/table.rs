// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned record table used as chart input and by the data-table view.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::record::{Record, Value};
use crate::transform::SortOrder;

/// An owned list of records with stable row keys.
///
/// Row keys give each record an identity that survives sorting and filtering, so hover
/// state, tooltips and legend toggles can refer to a record without depending on its
/// current position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    row_keys: Vec<u64>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset with row keys `0..records.len()`.
    pub fn new(records: Vec<Record>) -> Self {
        let row_keys = (0..records.len() as u64).collect();
        Self { row_keys, records }
    }

    /// Creates a dataset with explicit row keys.
    pub fn with_row_keys(row_keys: Vec<u64>, records: Vec<Record>) -> Result<Self, DataError> {
        if row_keys.len() != records.len() {
            return Err(DataError::RowKeyMismatch {
                keys: row_keys.len(),
                records: records.len(),
            });
        }
        Ok(Self { row_keys, records })
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all records in row order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns all row keys in row order.
    pub fn row_keys(&self) -> &[u64] {
        &self.row_keys
    }

    /// Returns the record at `row`.
    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// Returns the row index for a row key.
    pub fn row_for_key(&self, key: u64) -> Option<usize> {
        self.row_keys.iter().position(|&k| k == key)
    }

    /// Returns the record for a row key.
    pub fn record_for_key(&self, key: u64) -> Option<&Record> {
        self.row_for_key(key).and_then(|row| self.records.get(row))
    }

    /// Iterates `(row_key, record)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Record)> {
        self.row_keys.iter().copied().zip(self.records.iter())
    }

    /// Gets a numeric value for a row/field if both exist.
    pub fn f64(&self, row: usize, key: &str) -> Option<f64> {
        self.records.get(row)?.f64(key)
    }

    /// Returns the union of field names across all records, in first-seen order.
    pub fn column_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for record in &self.records {
            for key in record.keys() {
                if seen.insert(key) {
                    out.push(key.to_string());
                }
            }
        }
        out
    }

    /// Replaces a cell with an edited value, returning the previous value.
    ///
    /// The text is stored as a number when it parses as one, otherwise as text. The field
    /// is added to the record if it did not exist.
    pub fn set_cell(
        &mut self,
        row: usize,
        key: &str,
        text: &str,
    ) -> Result<Option<Value>, DataError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(DataError::RowOutOfRange { row, len })?;
        let previous = record.set(key, Value::parse_number(text));
        tracing::debug!(row, key, "edited cell");
        Ok(previous)
    }

    /// Returns a new dataset with rows reordered by `order` (a list of row indices).
    ///
    /// Indices that are out of range are ignored.
    pub fn reordered(&self, order: &[usize]) -> Self {
        let mut row_keys = Vec::with_capacity(order.len());
        let mut records = Vec::with_capacity(order.len());
        for &row in order {
            if let (Some(&key), Some(record)) = (self.row_keys.get(row), self.records.get(row)) {
                row_keys.push(key);
                records.push(record.clone());
            }
        }
        Self { row_keys, records }
    }
}

/// Column sort state for a data-table view.
///
/// Clicking the same column toggles ascending/descending; clicking another column sorts
/// that column ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Sorted column, if any.
    pub key: Option<String>,
    /// Sort direction.
    pub order: SortOrder,
}

impl SortState {
    /// Returns the state after the user selects `key`.
    pub fn toggle(self, key: &str) -> Self {
        let order = if self.key.as_deref() == Some(key) && self.order == SortOrder::Asc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        Self {
            key: Some(key.to_string()),
            order,
        }
    }

    /// Returns the display order of rows (indices into `data`).
    ///
    /// The sort is stable; records missing the key sort last in either direction. The data
    /// itself is not modified.
    pub fn sorted_rows(&self, data: &Dataset) -> Vec<usize> {
        let mut rows: Vec<usize> = (0..data.row_count()).collect();
        let Some(key) = self.key.as_deref() else {
            return rows;
        };
        let order = self.order;
        rows.sort_by(|&a, &b| {
            let va = data.records[a].get(key);
            let vb = data.records[b].get(key);
            compare_cells(va, vb, order)
        });
        rows
    }
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Asc => a.sort_cmp(b),
            SortOrder::Desc => b.sort_cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Record::new().with("name", "b").with("v", 2.0),
            Record::new().with("name", "a").with("v", 3.0),
            Record::new().with("name", "c"),
            Record::new().with("name", "d").with("v", 1.0),
        ])
    }

    #[test]
    fn row_keys_default_to_indices() {
        let data = sample();
        assert_eq!(data.row_keys(), [0, 1, 2, 3]);
        let name = data.record_for_key(2).and_then(|r| r.category("name"));
        assert_eq!(name.as_deref(), Some("c"));
    }

    #[test]
    fn mismatched_row_keys_are_rejected() {
        let err = Dataset::with_row_keys(vec![1], Vec::new()).unwrap_err();
        assert_eq!(err, DataError::RowKeyMismatch { keys: 1, records: 0 });
    }

    #[test]
    fn toggle_switches_direction_only_for_the_same_column() {
        let s = SortState::default().toggle("v");
        assert_eq!(s.order, SortOrder::Asc);
        let s = s.toggle("v");
        assert_eq!(s.order, SortOrder::Desc);
        let s = s.toggle("name");
        assert_eq!(s.order, SortOrder::Asc);
        assert_eq!(s.key.as_deref(), Some("name"));
    }

    #[test]
    fn sorted_rows_put_missing_values_last() {
        let data = sample();
        let asc = SortState::default().toggle("v");
        assert_eq!(asc.sorted_rows(&data), [3, 0, 1, 2]);
        let desc = asc.toggle("v");
        assert_eq!(desc.sorted_rows(&data), [1, 0, 3, 2]);
    }

    #[test]
    fn set_cell_parses_numbers_and_reports_range_errors() {
        let mut data = sample();
        let prev = data.set_cell(0, "v", "7.5").unwrap();
        assert_eq!(prev, Some(Value::Number(2.0)));
        assert_eq!(data.f64(0, "v"), Some(7.5));

        data.set_cell(1, "note", "hello").unwrap();
        assert_eq!(data.column_names(), ["name", "v", "note"]);

        let err = data.set_cell(9, "v", "1").unwrap_err();
        assert_eq!(err, DataError::RowOutOfRange { row: 9, len: 4 });
    }

    #[test]
    fn reordered_keeps_row_identity() {
        let data = sample();
        let order = SortState::default().toggle("name").sorted_rows(&data);
        let sorted = data.reordered(&order);
        assert_eq!(sorted.row_keys(), [1, 0, 2, 3]);
    }
}
