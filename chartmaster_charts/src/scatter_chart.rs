// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter plots, optionally colored by a group field.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use chartmaster_data::Dataset;
use kurbo::{Circle, Point, Rect};

use crate::axis::AxisGuide;
use crate::domain::{Categorical, categorical_domain, continuous_domain};
use crate::error::ChartError;
use crate::geometry::{ChartGeometry, complete_rows};
use crate::legend::Legend;
use crate::primitive::{Mark, Primitive};
use crate::scale::{OrdinalColors, ScaleLinear};
use crate::theme::Theme;
use crate::z_order;

/// Tick count the scatter domains are niced to.
const NICE_COUNT: usize = 10;

/// Options for a scatter plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterChartSpec {
    /// Field holding x values.
    pub x: String,
    /// Field holding y values.
    pub y: String,
    /// Optional field whose category picks the point color.
    pub group: Option<String>,
    /// Point radius.
    pub radius: f64,
    /// Category order used for colors. Defaults to the groups in the data.
    pub color_domain: Option<Categorical>,
}

impl ScatterChartSpec {
    /// Creates a scatter plot with radius 6.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            group: None,
            radius: 6.0,
            color_domain: None,
        }
    }

    /// Colors points by the category under `group`.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the point radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Pins the category order used for colors.
    pub fn with_color_domain(mut self, domain: Categorical) -> Self {
        self.color_domain = Some(domain);
        self
    }

    /// Builds the chart geometry. Both domains are the data extent, niced outwards.
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        let records = data.records();
        let x_domain = continuous_domain(records, &self.x)?.nice(NICE_COUNT);
        let y_domain = continuous_domain(records, &self.y)?.nice(NICE_COUNT);
        let x = ScaleLinear::new(x_domain, (plot.x0, plot.x1));
        let y = ScaleLinear::new(y_domain, (plot.y1, plot.y0));

        let colors = self.group.as_ref().map(|key| {
            let domain = self
                .color_domain
                .clone()
                .unwrap_or_else(|| categorical_domain(records, key));
            OrdinalColors::new(domain, theme.categorical.clone())
        });

        let mut marks = Vec::with_capacity(data.row_count());
        for (row_key, record, [xv, yv]) in complete_rows(data, [self.x.as_str(), self.y.as_str()])
        {
            let fill = match (&colors, &self.group) {
                (Some(colors), Some(key)) => record
                    .category(key)
                    .map_or(colors.color_at(0), |c| colors.color(&c)),
                _ => theme.primary(),
            };
            marks.push(Mark::for_row(
                row_key,
                z_order::SERIES_POINTS,
                Primitive::Circle {
                    circle: Circle::new(Point::new(x.map(xv), y.map(yv)), self.radius),
                    fill: Some(fill.into()),
                    stroke: None,
                },
            ));
        }

        tracing::debug!(
            kind = "scatter",
            records = data.row_count(),
            marks = marks.len(),
            "built chart"
        );
        Ok(ChartGeometry {
            plot,
            marks,
            x_axis: Some(AxisGuide::bottom_linear(x).with_grid(true)),
            y_axis: Some(AxisGuide::left_linear(y).with_grid(true)),
            legend: colors.map(|c| Legend::from_colors(&c, &BTreeSet::new(), theme.axis_text)),
        })
    }
}
