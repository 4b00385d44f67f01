// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built chart geometry and the record accessors shared by builders.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use chartmaster_data::{Dataset, Record};
use kurbo::Rect;

use crate::axis::{AxisGuide, AxisStyle};
use crate::error::ChartError;
use crate::legend::Legend;
use crate::primitive::{Mark, sort_marks};

/// The output of a geometry builder.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartGeometry {
    /// The plot rectangle the geometry was built for.
    pub plot: Rect,
    /// Series marks (and chart-specific guides such as radar levels).
    pub marks: Vec<Mark>,
    /// Horizontal axis, for cartesian charts.
    pub x_axis: Option<AxisGuide>,
    /// Vertical axis, for cartesian charts.
    pub y_axis: Option<AxisGuide>,
    /// Series legend, for charts colored by category.
    pub legend: Option<Legend>,
}

impl ChartGeometry {
    /// Geometry with nothing to draw.
    pub fn empty(plot: Rect) -> Self {
        Self {
            plot,
            marks: Vec::new(),
            x_axis: None,
            y_axis: None,
            legend: None,
        }
    }

    /// Returns `true` if there are no series marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns series and axis marks in paint order. Legend marks are placed separately
    /// with [`Legend::marks`].
    pub fn scene(&self, axis_style: &AxisStyle) -> Vec<Mark> {
        let mut out = self.marks.clone();
        for axis in self.x_axis.iter().chain(self.y_axis.iter()) {
            out.extend(axis.marks(self.plot, axis_style));
        }
        sort_marks(&mut out);
        out
    }

    /// Returns the marks that represent the record with `row_key`.
    pub fn marks_for_row(&self, row_key: u64) -> impl Iterator<Item = &Mark> {
        self.marks
            .iter()
            .filter(move |m| m.row_key == Some(row_key))
    }
}

/// Iterates records that hold a numeric value under every key, with those values.
///
/// Records lacking one are skipped and reported at `trace` level.
pub(crate) fn complete_rows<'a, const N: usize>(
    data: &'a Dataset,
    keys: [&'a str; N],
) -> impl Iterator<Item = (u64, &'a Record, [f64; N])> + 'a {
    data.iter().filter_map(move |(row_key, record)| {
        let mut values = [0.0; N];
        for (slot, key) in values.iter_mut().zip(keys) {
            match record.f64(key) {
                Some(v) => *slot = v,
                None => {
                    tracing::trace!(row_key, key, "skipping record without a numeric value");
                    return None;
                }
            }
        }
        Some((row_key, record, values))
    })
}

/// Returns the numeric value under `key`, or [`ChartError::MissingAccessorValue`].
pub fn require_f64(row_key: u64, record: &Record, key: &str) -> Result<f64, ChartError> {
    record.f64(key).ok_or_else(|| ChartError::MissingAccessorValue {
        row_key,
        key: key.to_string(),
    })
}
