// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Summary statistics over a numeric field.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::table::Dataset;

/// Count, sum, mean, median, standard deviation and extent of a set of values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of numeric values.
    pub count: usize,
    /// Sum of values.
    pub sum: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Upper median: the element at index `count / 2` of the sorted values.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Summary {
    /// Summarizes the numeric values of `key` across `data`.
    ///
    /// Numeric text (e.g. an edited table cell) counts as a number. Returns `None` if no
    /// numeric values are present.
    pub fn of(data: &Dataset, key: &str) -> Option<Self> {
        let values: Vec<f64> = data
            .records()
            .iter()
            .filter_map(|r| r.get(key).and_then(|v| v.to_number_lenient()))
            .collect();
        Self::from_values(&values)
    }

    /// Summarizes a slice of values. Non-finite values are ignored.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let n = count as f64;
        let sum: f64 = sorted.iter().sum();
        let mean = sum / n;
        let variance = sorted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Some(Self {
            count,
            sum,
            mean,
            median: sorted[count / 2],
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[count - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::record::Record;

    #[test]
    fn summary_matches_hand_computed_values() {
        let s = Summary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert!((s.sum - 40.0).abs() < 1e-12, "sum was {}", s.sum);
        assert!((s.mean - 5.0).abs() < 1e-12, "mean was {}", s.mean);
        assert!((s.std_dev - 2.0).abs() < 1e-12, "std dev was {}", s.std_dev);
        assert_eq!(s.median, 5.0);
        assert_eq!((s.min, s.max), (2.0, 9.0));
    }

    #[test]
    fn median_is_the_upper_middle_element() {
        let s = Summary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.median, 3.0);
    }

    #[test]
    fn summary_of_dataset_skips_non_numeric_cells() {
        let data = Dataset::new(vec![
            Record::new().with("v", 1.0),
            Record::new().with("v", "3"),
            Record::new().with("v", "n/a"),
            Record::new(),
        ]);
        let s = Summary::of(&data, "v").unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.sum, 4.0);
    }

    #[test]
    fn empty_selection_has_no_summary() {
        assert!(Summary::from_values(&[]).is_none());
        assert!(Summary::of(&Dataset::default(), "v").is_none());
    }
}
