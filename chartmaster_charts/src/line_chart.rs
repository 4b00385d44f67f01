// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line charts: one polyline through the records in input order.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartmaster_data::Dataset;
use kurbo::{Circle, Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::axis::AxisGuide;
use crate::domain::continuous_domain;
use crate::error::ChartError;
use crate::geometry::{ChartGeometry, complete_rows};
use crate::primitive::{Mark, Primitive, StrokeStyle};
use crate::scale::ScaleLinear;
use crate::theme::Theme;
use crate::z_order;

/// Options for a line chart.
///
/// The x domain is the extent of `x`; the y domain is `[0, max(y)]`. Records are joined
/// in input order, so callers sort by `x` first.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChartSpec {
    /// Field holding x values.
    pub x: String,
    /// Field holding y values.
    pub y: String,
    /// Line width.
    pub stroke_width: f64,
    /// Line color. Defaults to the theme's primary series color.
    pub color: Option<Color>,
    /// Radius of point markers, if drawn.
    pub point_radius: Option<f64>,
}

impl LineChartSpec {
    /// Creates a line chart over `x` and `y`.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            stroke_width: 2.0,
            color: None,
            point_radius: None,
        }
    }

    /// Sets the line width.
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the line color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Draws a marker of `radius` at every point.
    pub fn with_points(mut self, radius: f64) -> Self {
        self.point_radius = Some(radius);
        self
    }

    /// Returns the x and y scales for `data` in `plot`.
    pub fn scales(
        &self,
        data: &Dataset,
        plot: Rect,
    ) -> Result<(ScaleLinear, ScaleLinear), ChartError> {
        let records = data.records();
        let x = ScaleLinear::new(continuous_domain(records, &self.x)?, (plot.x0, plot.x1));
        let y = ScaleLinear::new(
            continuous_domain(records, &self.y)?.from_zero(),
            (plot.y1, plot.y0),
        );
        Ok((x, y))
    }

    /// Builds the chart geometry.
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        let (x, y) = self.scales(data, plot)?;
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

        let mut marks = Vec::with_capacity(markers.len() + 1);
        marks.push(Mark::new(
            z_order::SERIES_STROKE,
            Primitive::Polyline {
                points,
                stroke: StrokeStyle::solid(color, self.stroke_width),
            },
        ));
        marks.extend(markers);

        tracing::debug!(
            kind = "line",
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

/// A white-filled, outlined point marker for a record.
pub(crate) fn point_marker(
    row_key: u64,
    center: Point,
    radius: f64,
    color: Color,
    width: f64,
) -> Mark {
    Mark::for_row(
        row_key,
        z_order::SERIES_POINTS,
        Primitive::Circle {
            circle: Circle::new(center, radius),
            fill: Some(css::WHITE.into()),
            stroke: Some(StrokeStyle::solid(color, width)),
        },
    )
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use chartmaster_data::Record;

    use super::*;

    fn data() -> Dataset {
        Dataset::new(vec![
            Record::new().with("x", 0.0).with("y", 10.0),
            Record::new().with("x", 1.0).with("y", 15.0),
            Record::new().with("x", 2.0).with("y", 35.0),
        ])
    }

    #[test]
    fn points_follow_the_scales() {
        let plot = Rect::new(0.0, 0.0, 300.0, 350.0);
        let g = LineChartSpec::new("x", "y")
            .build(&data(), plot, &Theme::light())
            .unwrap();
        let Primitive::Polyline { points, stroke } = &g.marks[0].primitive else {
            panic!("expected a polyline");
        };
        assert_eq!(stroke.stroke_width, 2.0);
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, [0.0, 150.0, 300.0]);
        // y domain is [0, 35] over a reversed range.
        assert_eq!(points[2].y, 0.0);
        assert_eq!(points[0].y, 250.0);
        assert!(g.x_axis.is_some() && g.y_axis.as_ref().is_some_and(|a| a.grid));
    }

    #[test]
    fn markers_carry_row_keys() {
        let plot = Rect::new(0.0, 0.0, 300.0, 350.0);
        let g = LineChartSpec::new("x", "y")
            .with_points(4.0)
            .build(&data(), plot, &Theme::light())
            .unwrap();
        assert_eq!(g.marks.len(), 4);
        assert_eq!(g.marks_for_row(1).count(), 1);
    }

    #[test]
    fn missing_field_is_empty_input() {
        let plot = Rect::new(0.0, 0.0, 300.0, 350.0);
        let err = LineChartSpec::new("x", "nope").build(&data(), plot, &Theme::light());
        assert_eq!(err, Err(ChartError::EmptyInput));
    }
}
