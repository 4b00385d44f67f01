// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Errors returned when building or editing a [`Dataset`](crate::Dataset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The number of row keys does not match the number of records.
    RowKeyMismatch {
        /// Number of row keys supplied.
        keys: usize,
        /// Number of records supplied.
        records: usize,
    },
    /// A row index is outside the dataset.
    RowOutOfRange {
        /// Requested row.
        row: usize,
        /// Number of rows in the dataset.
        len: usize,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowKeyMismatch { keys, records } => {
                write!(f, "{keys} row keys supplied for {records} records")
            }
            Self::RowOutOfRange { row, len } => {
                write!(f, "row {row} is out of range for a dataset of {len} rows")
            }
        }
    }
}

impl core::error::Error for DataError {}
