// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain calculation.
//!
//! A domain is the extent of the data along one dimension: a numeric interval for
//! continuous scales, or the distinct category keys for band and ordinal scales.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartmaster_data::Record;
use hashbrown::HashSet;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::DomainError;
use crate::ticks::tick_step;

/// A numeric interval with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Continuous {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Continuous {
    /// Creates an interval from two bounds given in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Returns `true` if `min == max`.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Returns `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if `v` lies within the interval.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Returns `[0, max]`, the value axis used by line, area and bar charts.
    pub fn from_zero(self) -> Self {
        Self::new(0.0, self.max)
    }

    /// Returns `[min * lo_factor, max * hi_factor]`.
    pub fn padded(self, lo_factor: f64, hi_factor: f64) -> Self {
        Self::new(self.min * lo_factor, self.max * hi_factor)
    }

    /// Extends the interval outwards to multiples of the tick step for `count` ticks.
    ///
    /// The step is recomputed after each extension until it is stable.
    pub fn nice(self, count: usize) -> Self {
        let (mut lo, mut hi) = (self.min, self.max);
        let mut prev = 0.0;
        for _ in 0..10 {
            let step = tick_step(lo, hi, count);
            if step == 0.0 || step == prev {
                break;
            }
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
            prev = step;
        }
        Self::new(lo, hi)
    }
}

/// Returns the min/max of the numeric values under `key`.
///
/// Records missing the key, or holding a non-numeric or non-finite value, are skipped.
pub fn continuous_domain(records: &[Record], key: &str) -> Result<Continuous, DomainError> {
    continuous_domain_multi(records, &[key])
}

/// Returns the min/max across the numeric values of several keys.
pub fn continuous_domain_multi(
    records: &[Record],
    keys: &[&str],
) -> Result<Continuous, DomainError> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in records
        .iter()
        .flat_map(|r| keys.iter().filter_map(|k| r.f64(k)))
    {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Ok(Continuous { min, max })
    } else {
        Err(DomainError::EmptyInput)
    }
}

/// Distinct category keys in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Categorical {
    values: Vec<String>,
}

impl Categorical {
    /// Creates a domain from keys, dropping duplicates.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for v in values {
            let v = v.into();
            if seen.insert(v.clone()) {
                out.push(v);
            }
        }
        Self { values: out }
    }

    /// Returns the category keys.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the position of `category` in the domain.
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.values.iter().position(|v| v == category)
    }

    /// Returns `true` if `category` is part of the domain.
    pub fn contains(&self, category: &str) -> bool {
        self.index_of(category).is_some()
    }

    /// Returns the number of categories.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Returns the distinct category keys under `key`, in first-seen order.
pub fn categorical_domain(records: &[Record], key: &str) -> Categorical {
    Categorical::new(records.iter().filter_map(|r| r.category(key)))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn points() -> Vec<Record> {
        vec![
            Record::new().with("x", 0.0).with("y", 10.0),
            Record::new().with("x", 1.0).with("y", 15.0),
            Record::new().with("x", 2.0).with("y", 35.0),
            Record::new().with("x", "n/a"),
            Record::new().with("x", f64::NAN),
        ]
    }

    #[test]
    fn continuous_domain_skips_missing_and_non_finite_values() {
        let d = continuous_domain(&points(), "x").unwrap();
        assert_eq!(d, Continuous { min: 0.0, max: 2.0 });
        let d = continuous_domain(&points(), "y").unwrap();
        assert!(d.min <= d.max);
        assert_eq!((d.min, d.max), (10.0, 35.0));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(continuous_domain(&[], "x"), Err(DomainError::EmptyInput));
        assert_eq!(
            continuous_domain(&points(), "missing"),
            Err(DomainError::EmptyInput)
        );
    }

    #[test]
    fn multi_key_domain_spans_all_keys() {
        let records = vec![
            Record::new().with("low", 5.0).with("open", 7.0).with("close", 6.0),
            Record::new().with("low", 4.0).with("open", 9.0).with("close", 8.0),
        ];
        let d = continuous_domain_multi(&records, &["low", "open", "close"]).unwrap();
        assert_eq!((d.min, d.max), (4.0, 9.0));
    }

    #[test]
    fn categorical_domain_dedups_in_first_seen_order() {
        let records = vec![
            Record::new().with("c", "b"),
            Record::new().with("c", "a"),
            Record::new(),
            Record::new().with("c", "b"),
        ];
        let d = categorical_domain(&records, "c");
        assert_eq!(d.values(), ["b", "a"]);
        assert_eq!(d.index_of("a"), Some(1));
        assert!(!d.contains("z"));
    }

    #[test]
    fn adjustments() {
        let d = Continuous::new(10.0, 35.0);
        assert_eq!(d.from_zero(), Continuous::new(0.0, 35.0));
        let p = d.padded(0.9, 1.1);
        assert!((p.min - 9.0).abs() < 1e-9, "min was {}", p.min);
        assert!((p.max - 38.5).abs() < 1e-9, "max was {}", p.max);
        assert_eq!(Continuous::new(3.0, 97.0).nice(5), Continuous::new(0.0, 100.0));
        assert_eq!(Continuous::new(4.0, 4.0).nice(5), Continuous::new(4.0, 4.0));
        assert!(Continuous::new(2.0, 2.0).is_degenerate());
    }
}
