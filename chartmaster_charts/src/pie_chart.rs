// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie and donut charts.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

use chartmaster_data::Dataset;
use kurbo::{Point, Rect, Vec2};
use peniko::color::palette::css;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::domain::{Categorical, categorical_domain};
use crate::error::ChartError;
use crate::geometry::ChartGeometry;
use crate::layout::plot_radius;
use crate::legend::Legend;
use crate::primitive::{Label, Mark, Primitive, StrokeStyle};
use crate::scale::OrdinalColors;
use crate::theme::Theme;
use crate::z_order;

/// Angle of 12 o'clock, where the first slice starts.
pub const PIE_START_ANGLE: f64 = -FRAC_PI_2;

/// Slices narrower than this (in radians) get no label.
const MIN_LABEL_SWEEP: f64 = 0.25;

/// Slice ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PieSort {
    /// Input order.
    #[default]
    None,
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// The angular span of one value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    /// Index of the value in the input.
    pub index: usize,
    /// The value.
    pub value: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
}

impl PieSlice {
    /// Returns the angular sweep.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Returns the middle of the annulus section, where slice labels go.
    pub fn centroid(&self, center: Point, inner_radius: f64, outer_radius: f64) -> Point {
        let r = 0.5 * (inner_radius + outer_radius);
        let a = 0.5 * (self.start_angle + self.end_angle);
        center + Vec2::new(r * a.cos(), r * a.sin())
    }
}

/// Lays out values as consecutive angular spans starting at 12 o'clock.
///
/// Each sweep is proportional to `value / total` and the spans cover exactly one turn.
/// Slices come back in layout order; with [`PieSort::None`] that is input order, otherwise
/// a stable sort by value.
pub fn pie_slices(values: &[f64], sort: PieSort) -> Result<Vec<PieSlice>, ChartError> {
    let total: f64 = values.iter().sum();
    if values.iter().any(|v| v.is_nan() || *v < 0.0) || !total.is_finite() || total <= 0.0 {
        return Err(ChartError::InvalidPieTotal { total });
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    match sort {
        PieSort::None => {}
        PieSort::Ascending => order.sort_by(|&a, &b| values[a].total_cmp(&values[b])),
        PieSort::Descending => order.sort_by(|&a, &b| values[b].total_cmp(&values[a])),
    }

    let mut slices = Vec::with_capacity(values.len());
    let mut cumulative = 0.0;
    for (n, &index) in order.iter().enumerate() {
        let value = values[index];
        let start_angle = PIE_START_ANGLE + cumulative / total * TAU;
        cumulative += value;
        let end_angle = if n + 1 == order.len() {
            PIE_START_ANGLE + TAU
        } else {
            PIE_START_ANGLE + cumulative / total * TAU
        };
        slices.push(PieSlice {
            index,
            value,
            start_angle,
            end_angle,
        });
    }
    Ok(slices)
}

/// Options for a pie chart.
#[derive(Clone, Debug, PartialEq)]
pub struct PieChartSpec {
    /// Field holding slice values.
    pub value: String,
    /// Field holding slice labels; also the color category.
    pub label: String,
    /// Slice ordering.
    pub sort: PieSort,
    /// Inner radius as a fraction of the outer radius (0 for a full pie).
    pub inner_ratio: f64,
    /// Category order used for colors. Defaults to the labels in the data.
    pub color_domain: Option<Categorical>,
}

impl PieChartSpec {
    /// Creates a pie chart.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            sort: PieSort::None,
            inner_ratio: 0.0,
            color_domain: None,
        }
    }

    /// Sets slice ordering.
    pub fn with_sort(mut self, sort: PieSort) -> Self {
        self.sort = sort;
        self
    }

    /// Makes a donut with the given inner radius fraction.
    pub fn with_inner_ratio(mut self, inner_ratio: f64) -> Self {
        self.inner_ratio = inner_ratio.clamp(0.0, 0.95);
        self
    }

    /// Pins the category order used for colors.
    pub fn with_color_domain(mut self, domain: Categorical) -> Self {
        self.color_domain = Some(domain);
        self
    }

    /// Builds the chart geometry: one arc per record centered in `plot`.
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        let rows: Vec<(u64, Option<String>, f64)> = data
            .iter()
            .filter_map(|(row_key, record)| match record.f64(&self.value) {
                Some(v) => Some((row_key, record.category(&self.label), v)),
                None => {
                    tracing::trace!(row_key, "skipping slice without a value");
                    None
                }
            })
            .collect();
        if rows.is_empty() {
            return Err(ChartError::EmptyInput);
        }
        let values: Vec<f64> = rows.iter().map(|r| r.2).collect();
        let slices = pie_slices(&values, self.sort)?;

        let domain = self
            .color_domain
            .clone()
            .unwrap_or_else(|| categorical_domain(data.records(), &self.label));
        let colors = OrdinalColors::new(domain, theme.categorical.clone());

        let center = plot.center();
        let outer = plot_radius(plot);
        let inner = outer * self.inner_ratio;
        let mut marks = Vec::with_capacity(2 * slices.len());
        for slice in &slices {
            let (row_key, label, _) = &rows[slice.index];
            let fill = label.as_deref().map_or(colors.color_at(0), |l| colors.color(l));
            marks.push(Mark::for_row(
                *row_key,
                z_order::SERIES_FILL,
                Primitive::Arc {
                    center,
                    inner_radius: inner,
                    outer_radius: outer,
                    start_angle: slice.start_angle,
                    end_angle: slice.end_angle,
                    fill: fill.into(),
                    stroke: Some(StrokeStyle::solid(theme.background, 1.0)),
                },
            ));
            if let Some(text) = label
                && slice.sweep() > MIN_LABEL_SWEEP
            {
                let anchor = slice.centroid(center, inner, outer);
                marks.push(Mark::for_row(
                    *row_key,
                    z_order::SERIES_LABELS,
                    Primitive::Label(Label::new(anchor, text.clone(), css::WHITE)),
                ));
            }
        }

        tracing::debug!(
            kind = "pie",
            records = data.row_count(),
            marks = marks.len(),
            "built chart"
        );
        Ok(ChartGeometry {
            plot,
            marks,
            x_axis: None,
            y_axis: None,
            legend: Some(Legend::from_colors(&colors, &BTreeSet::new(), theme.axis_text)),
        })
    }
}
