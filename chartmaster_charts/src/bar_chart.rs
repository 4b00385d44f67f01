// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar charts: one rectangle per record on a band scale.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartmaster_data::Dataset;
use kurbo::Rect;
use peniko::Color;

use crate::axis::AxisGuide;
use crate::domain::{categorical_domain, continuous_domain};
use crate::error::{ChartError, DomainError};
use crate::geometry::ChartGeometry;
use crate::primitive::{Mark, Primitive};
use crate::scale::{ScaleBand, ScaleLinear};
use crate::theme::Theme;
use crate::z_order;

/// Options for a bar chart.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChartSpec {
    /// Field holding the category of each bar.
    pub x: String,
    /// Field holding bar heights.
    pub y: String,
    /// Band padding in `[0, 1)`.
    pub padding: f64,
    /// Bar color. Defaults to the theme's primary series color.
    pub color: Option<Color>,
}

impl BarChartSpec {
    /// Creates a bar chart with padding `0.1`.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            padding: 0.1,
            color: None,
        }
    }

    /// Sets the band padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the bar color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Builds the chart geometry.
    ///
    /// Each bar spans `[y(value), plot.y1]`. Values at or below the domain minimum give a
    /// zero-height bar on the baseline.
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        let records = data.records();
        let categories = categorical_domain(records, &self.x);
        if categories.is_empty() {
            return Err(DomainError::EmptyInput.into());
        }
        let band = ScaleBand::new(categories, (plot.x0, plot.x1)).with_padding(self.padding);
        let y_domain = continuous_domain(records, &self.y)?.from_zero();
        let y = ScaleLinear::new(y_domain, (plot.y1, plot.y0));
        let fill = self.color.unwrap_or_else(|| theme.primary());

        let mut marks = Vec::with_capacity(data.row_count());
        for (row_key, record) in data.iter() {
            let (Some(category), Some(value)) = (record.category(&self.x), record.f64(&self.y))
            else {
                tracing::trace!(row_key, "skipping bar without a category and value");
                continue;
            };
            let x0 = band.position(&category)?;
            let top = y.map(value.max(y_domain.min)).min(plot.y1);
            marks.push(Mark::for_row(
                row_key,
                z_order::SERIES_FILL,
                Primitive::Rect {
                    rect: Rect::new(x0, top, x0 + band.bandwidth(), plot.y1),
                    fill: fill.into(),
                },
            ));
        }

        tracing::debug!(
            kind = "bar",
            records = data.row_count(),
            marks = marks.len(),
            "built chart"
        );
        Ok(ChartGeometry {
            plot,
            marks,
            x_axis: Some(AxisGuide::bottom_band(band)),
            y_axis: Some(AxisGuide::left_linear(y).with_grid(true)),
            legend: None,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use chartmaster_data::Record;

    use super::*;

    fn bars(g: &ChartGeometry) -> Vec<Rect> {
        g.marks
            .iter()
            .filter_map(|m| match m.primitive {
                Primitive::Rect { rect, .. } => Some(rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bars_fill_their_bands_down_to_the_baseline() {
        let data = Dataset::new(vec![
            Record::new().with("cat", "A").with("v", 30.0),
            Record::new().with("cat", "B").with("v", 60.0),
            Record::new().with("cat", "C").with("v", 15.0),
        ]);
        let plot = Rect::new(0.0, 0.0, 300.0, 120.0);
        let g = BarChartSpec::new("cat", "v")
            .build(&data, plot, &Theme::light())
            .unwrap();
        let rects = bars(&g);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[1].x0, 100.0);
        assert!((rects[0].width() - 300.0 / 3.0 / 1.1).abs() < 1e-9);
        assert_eq!(rects[1].y0, 0.0);
        assert_eq!(rects[0].y0, 60.0);
        assert!(rects.iter().all(|r| r.y1 == 120.0));
    }

    #[test]
    fn negative_values_collapse_to_the_baseline() {
        let data = Dataset::new(vec![
            Record::new().with("cat", "A").with("v", -5.0),
            Record::new().with("cat", "B").with("v", 10.0),
        ]);
        let plot = Rect::new(0.0, 0.0, 200.0, 100.0);
        let g = BarChartSpec::new("cat", "v")
            .build(&data, plot, &Theme::light())
            .unwrap();
        let rects = bars(&g);
        assert_eq!(rects[0].height(), 0.0);
        assert_eq!(rects[0].y1, 100.0);
    }

    #[test]
    fn records_without_values_are_skipped() {
        let data = Dataset::new(vec![
            Record::new().with("cat", "A").with("v", 1.0),
            Record::new().with("cat", "B"),
        ]);
        let plot = Rect::new(0.0, 0.0, 200.0, 100.0);
        let g = BarChartSpec::new("cat", "v")
            .build(&data, plot, &Theme::light())
            .unwrap();
        assert_eq!(bars(&g).len(), 1);
        assert_eq!(g.marks[0].row_key, Some(0));
    }
}
