// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radar charts: one closed polygon per record over a set of numeric features.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

use chartmaster_data::Dataset;
use kurbo::{Circle, Line, Point, Rect, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::domain::{Categorical, Continuous, categorical_domain, continuous_domain_multi};
use crate::error::ChartError;
use crate::geometry::ChartGeometry;
use crate::layout::plot_radius;
use crate::legend::Legend;
use crate::primitive::{Label, Mark, Primitive, StrokeStyle};
use crate::scale::{OrdinalColors, ScaleLinear};
use crate::theme::Theme;
use crate::z_order;

/// Options for a radar chart.
#[derive(Clone, Debug, PartialEq)]
pub struct RadarChartSpec {
    /// Field naming each series.
    pub name: String,
    /// Feature fields, one spoke each. `None` uses the numeric fields of the first record.
    pub features: Option<Vec<String>>,
    /// Number of concentric level circles.
    pub levels: usize,
    /// Distance of spoke labels beyond the outer level.
    pub label_offset: f64,
    /// Polygon fill opacity.
    pub fill_opacity: f32,
    /// Category order used for colors. Defaults to the names in the data.
    pub color_domain: Option<Categorical>,
}

impl RadarChartSpec {
    /// Creates a radar chart with five levels.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: None,
            levels: 5,
            label_offset: 20.0,
            fill_opacity: 0.2,
            color_domain: None,
        }
    }

    /// Uses an explicit feature list.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the number of level circles.
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Pins the category order used for colors.
    pub fn with_color_domain(mut self, domain: Categorical) -> Self {
        self.color_domain = Some(domain);
        self
    }

    /// Returns the feature fields: the explicit list, or every numeric field of the first
    /// record other than the name field.
    pub fn feature_keys(&self, data: &Dataset) -> Vec<String> {
        if let Some(features) = &self.features {
            return features.clone();
        }
        data.record(0)
            .map(|first| {
                first
                    .iter()
                    .filter(|(k, v)| *k != self.name && v.as_f64().is_some())
                    .map(|(k, _)| k.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Builds the chart geometry.
    ///
    /// Spoke `i` of `n` points at `2πi/n - π/2`, so the first feature is at 12 o'clock.
    /// Values scale linearly from `[0, max]` onto `[0, radius]`; a missing value counts as
    /// zero.
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        let features = self.feature_keys(data);
        if features.is_empty() {
            return Err(ChartError::EmptyInput);
        }
        let keys: Vec<&str> = features.iter().map(String::as_str).collect();
        let max = continuous_domain_multi(data.records(), &keys)?.max;

        let center = plot.center();
        let radius = plot_radius(plot);
        let value = ScaleLinear::new(Continuous::new(0.0, max), (0.0, radius));
        #[allow(clippy::cast_precision_loss, reason = "feature counts are small")]
        let n = features.len() as f64;
        let directions: Vec<Vec2> = (0..features.len())
            .map(|i| {
                #[allow(clippy::cast_precision_loss, reason = "feature counts are small")]
                let angle = TAU * i as f64 / n - FRAC_PI_2;
                Vec2::new(angle.cos(), angle.sin())
            })
            .collect();

        let grid = StrokeStyle::solid(theme.grid, 0.5);
        let mut marks = Vec::new();
        for level in 1..=self.levels {
            #[allow(clippy::cast_precision_loss, reason = "level counts are small")]
            let r = radius * level as f64 / self.levels as f64;
            marks.push(Mark::new(
                z_order::GRID_LINES,
                Primitive::Circle {
                    circle: Circle::new(center, r),
                    fill: None,
                    stroke: Some(grid.clone()),
                },
            ));
        }
        for (feature, dir) in features.iter().zip(&directions) {
            marks.push(Mark::new(
                z_order::GRID_LINES,
                Primitive::Segment {
                    line: Line::new(center, center + *dir * radius),
                    stroke: grid.clone(),
                },
            ));
            let anchor = center + *dir * (radius + self.label_offset);
            marks.push(Mark::new(
                z_order::AXIS_LABELS,
                Primitive::Label(Label::new(anchor, feature.clone(), theme.axis_text)),
            ));
        }

        let domain = self
            .color_domain
            .clone()
            .unwrap_or_else(|| categorical_domain(data.records(), &self.name));
        let colors = OrdinalColors::new(domain, theme.categorical.clone());
        for (row_key, record) in data.iter() {
            let color = record
                .category(&self.name)
                .map_or(colors.color_at(0), |c| colors.color(&c));
            let points = keys
                .iter()
                .zip(&directions)
                .map(|(key, dir)| {
                    let v = record.f64(key).unwrap_or(0.0);
                    center + *dir * value.map(v)
                })
                .collect::<Vec<Point>>();
            marks.push(Mark::for_row(
                row_key,
                z_order::SERIES_FILL,
                Primitive::Polygon {
                    points,
                    fill: Some(color.with_alpha(self.fill_opacity).into()),
                    stroke: Some(StrokeStyle::solid(color, 2.0)),
                },
            ));
        }

        tracing::debug!(
            kind = "radar",
            records = data.row_count(),
            features = features.len(),
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
