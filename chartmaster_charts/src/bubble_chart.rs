// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble charts: scatter points sized by a third value.

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
use crate::primitive::{Label, Mark, Primitive, StrokeStyle, TextAnchor, TextBaseline};
use crate::scale::{OrdinalColors, ScaleLinear, ScaleSqrt};
use crate::theme::{Theme, darker};
use crate::z_order;

/// Options for a bubble chart.
///
/// Radii are area-proportional: `radius = sqrt(value / max) * max_radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleChartSpec {
    /// Field holding x values.
    pub x: String,
    /// Field holding y values.
    pub y: String,
    /// Field holding the sized value.
    pub size: String,
    /// Optional field whose category picks the bubble color.
    pub category: Option<String>,
    /// Optional field holding the text drawn above each bubble.
    pub label: Option<String>,
    /// Radius of the largest value.
    pub max_radius: f64,
    /// Bubble fill opacity.
    pub fill_opacity: f32,
    /// Category order used for colors. Defaults to the categories in the data.
    pub color_domain: Option<Categorical>,
}

impl BubbleChartSpec {
    /// Creates a bubble chart with a maximum radius of 25.
    pub fn new(x: impl Into<String>, y: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            size: size.into(),
            category: None,
            label: None,
            max_radius: 25.0,
            fill_opacity: 0.7,
            color_domain: None,
        }
    }

    /// Colors bubbles by the category under `category`.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Draws the text under `label` above each bubble.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the radius of the largest value.
    pub fn with_max_radius(mut self, max_radius: f64) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Pins the category order used for colors.
    pub fn with_color_domain(mut self, domain: Categorical) -> Self {
        self.color_domain = Some(domain);
        self
    }

    /// Returns the radius scale for `data`.
    pub fn radius_scale(&self, data: &Dataset) -> Result<ScaleSqrt, ChartError> {
        let max = continuous_domain(data.records(), &self.size)?.max;
        Ok(ScaleSqrt::new(max, (0.0, self.max_radius)))
    }

    /// Builds the chart geometry.
    ///
    /// The x and y domains are the data extent scaled by 0.9 and 1.1 so edge bubbles stay
    /// inside the plot.
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        let records = data.records();
        let x_domain = continuous_domain(records, &self.x)?.padded(0.9, 1.1);
        let y_domain = continuous_domain(records, &self.y)?.padded(0.9, 1.1);
        let x = ScaleLinear::new(x_domain, (plot.x0, plot.x1));
        let y = ScaleLinear::new(y_domain, (plot.y1, plot.y0));
        let r = self.radius_scale(data)?;

        let colors = self.category.as_ref().map(|key| {
            let domain = self
                .color_domain
                .clone()
                .unwrap_or_else(|| categorical_domain(records, key));
            OrdinalColors::new(domain, theme.categorical.clone())
        });

        let keys = [self.x.as_str(), self.y.as_str(), self.size.as_str()];
        let mut marks = Vec::with_capacity(2 * data.row_count());
        for (row_key, record, [xv, yv, sv]) in complete_rows(data, keys) {
            let color = match (&colors, &self.category) {
                (Some(colors), Some(key)) => record
                    .category(key)
                    .map_or(colors.color_at(0), |c| colors.color(&c)),
                _ => theme
                    .categorical
                    .first()
                    .copied()
                    .unwrap_or_else(|| theme.primary()),
            };
            let center = Point::new(x.map(xv), y.map(yv));
            let radius = r.map(sv);
            marks.push(Mark::for_row(
                row_key,
                z_order::SERIES_POINTS,
                Primitive::Circle {
                    circle: Circle::new(center, radius),
                    fill: Some(color.with_alpha(self.fill_opacity).into()),
                    stroke: Some(StrokeStyle::solid(darker(color), 1.0)),
                },
            ));
            if let Some(text) = self.label.as_ref().and_then(|k| record.category(k)) {
                let label = Label::new(
                    Point::new(center.x, center.y - radius - 5.0),
                    text,
                    theme.axis_text,
                )
                .with_align(TextAnchor::Middle, TextBaseline::Alphabetic);
                marks.push(Mark::for_row(
                    row_key,
                    z_order::SERIES_LABELS,
                    Primitive::Label(label),
                ));
            }
        }

        tracing::debug!(
            kind = "bubble",
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

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use chartmaster_data::Record;

    use super::*;

    fn radius(m: &Mark) -> f64 {
        match &m.primitive {
            Primitive::Circle { circle, .. } => circle.radius,
            other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn radius_ratio_follows_square_root_of_values() {
        let data = Dataset::new(vec![
            Record::new().with("x", 1.0).with("y", 1.0).with("v", 400.0),
            Record::new().with("x", 2.0).with("y", 2.0).with("v", 100.0),
        ]);
        let plot = Rect::new(0.0, 0.0, 400.0, 300.0);
        let g = BubbleChartSpec::new("x", "y", "v")
            .build(&data, plot, &Theme::light())
            .unwrap();
        let (r1, r2) = (radius(&g.marks[0]), radius(&g.marks[1]));
        assert_eq!(r1, 25.0);
        assert!((r1 / r2 - 2.0).abs() < 1e-9, "ratio {}", r1 / r2);
    }

    #[test]
    fn labels_sit_above_bubbles() {
        let data = Dataset::new(vec![
            Record::new()
                .with("x", 10.0)
                .with("y", 10.0)
                .with("v", 9.0)
                .with("name", "Alpha")
                .with("cat", "A"),
            Record::new()
                .with("x", 20.0)
                .with("y", 20.0)
                .with("v", 4.0)
                .with("name", "Beta")
                .with("cat", "B"),
        ]);
        let plot = Rect::new(0.0, 0.0, 400.0, 300.0);
        let g = BubbleChartSpec::new("x", "y", "v")
            .with_label("name")
            .with_category("cat")
            .build(&data, plot, &Theme::light())
            .unwrap();
        assert_eq!(g.marks.len(), 4);
        let Primitive::Circle { circle, .. } = &g.marks[0].primitive else {
            panic!("bubble first");
        };
        let Primitive::Label(label) = &g.marks[1].primitive else {
            panic!("then its label");
        };
        assert_eq!(label.text, "Alpha");
        assert!((label.anchor.y - (circle.center.y - circle.radius - 5.0)).abs() < 1e-9);
        assert_eq!(g.legend.map(|l| l.items.len()), Some(2));
    }

    #[test]
    fn domains_are_padded() {
        let data = Dataset::new(vec![
            Record::new().with("x", 10.0).with("y", 100.0).with("v", 1.0),
            Record::new().with("x", 20.0).with("y", 200.0).with("v", 1.0),
        ]);
        let plot = Rect::new(0.0, 0.0, 400.0, 300.0);
        let g = BubbleChartSpec::new("x", "y", "v")
            .build(&data, plot, &Theme::light())
            .unwrap();
        let Some(AxisGuide {
            scale: crate::axis::AxisScale::Linear(x),
            ..
        }) = &g.x_axis
        else {
            panic!("linear x axis");
        };
        assert!((x.domain().min - 9.0).abs() < 1e-9);
        assert!((x.domain().max - 22.0).abs() < 1e-9);
    }
}
