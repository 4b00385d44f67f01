// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area charts: a line plus the region between it and the plot baseline.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartmaster_data::Dataset;
use kurbo::{Point, Rect};
use peniko::Color;

use crate::axis::AxisGuide;
use crate::error::ChartError;
use crate::geometry::{ChartGeometry, complete_rows};
use crate::line_chart::{LineChartSpec, point_marker};
use crate::primitive::{Mark, Primitive, StrokeStyle};
use crate::theme::Theme;
use crate::z_order;

/// Options for an area chart.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaChartSpec {
    /// Field holding x values.
    pub x: String,
    /// Field holding y values.
    pub y: String,
    /// Width of the outline and marker strokes.
    pub stroke_width: f64,
    /// Fill opacity of the area.
    pub fill_opacity: f32,
    /// Series color. Defaults to the theme's primary series color.
    pub color: Option<Color>,
    /// Radius of point markers; `None` hides them.
    pub point_radius: Option<f64>,
}

impl AreaChartSpec {
    /// Creates an area chart over `x` and `y`.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            stroke_width: 2.0,
            fill_opacity: 0.3,
            color: None,
            point_radius: Some(4.0),
        }
    }

    /// Sets the outline width.
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the fill opacity.
    pub fn with_fill_opacity(mut self, fill_opacity: f32) -> Self {
        self.fill_opacity = fill_opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets the series color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Hides point markers.
    pub fn without_points(mut self) -> Self {
        self.point_radius = None;
        self
    }

    /// Builds the chart geometry.
    ///
    /// The area polygon starts and ends on the plot baseline (`plot.y1`) below the first
    /// and last points.
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        let (x, y) = LineChartSpec::new(self.x.clone(), self.y.clone()).scales(data, plot)?;
        let color = self.color.unwrap_or_else(|| theme.primary());

        let mut points = Vec::with_capacity(data.row_count());
        let mut markers = Vec::new();
        for (row_key, _, [xv, yv]) in complete_rows(data, [self.x.as_str(), self.y.as_str()]) {
            let p = Point::new(x.map(xv), y.map(yv));
            points.push(p);
            if let Some(r) = self.point_radius {
                markers.push(point_marker(row_key, p, r, color, self.stroke_width));
            }
        }

        let mut outline = Vec::with_capacity(points.len() + 2);
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            outline.push(Point::new(first.x, plot.y1));
            outline.extend_from_slice(&points);
            outline.push(Point::new(last.x, plot.y1));
        }

        let mut marks = Vec::with_capacity(markers.len() + 2);
        marks.push(Mark::new(
            z_order::SERIES_FILL,
            Primitive::Polygon {
                points: outline,
                fill: Some(color.with_alpha(self.fill_opacity).into()),
                stroke: None,
            },
        ));
        marks.push(Mark::new(
            z_order::SERIES_STROKE,
            Primitive::Polyline {
                points,
                stroke: StrokeStyle::solid(color, self.stroke_width),
            },
        ));
        marks.extend(markers);

        tracing::debug!(
            kind = "area",
            records = data.row_count(),
            marks = marks.len(),
            "built chart"
        );
        Ok(ChartGeometry {
            plot,
            marks,
            x_axis: Some(AxisGuide::bottom_linear(x)),
            y_axis: Some(AxisGuide::left_linear(y).with_grid(true)),
            legend: None,
        })
    }
}
