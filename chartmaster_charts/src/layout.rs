// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny arrange helper for charts.
//!
//! Given the outer view size, margins and an optional legend, compute the plot rectangle
//! that scales map into and where the legend goes.

use kurbo::{Point, Rect};

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plot for axes and labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margins {
    /// Margins for charts with a bottom and a left axis.
    pub const CARTESIAN: Self = Self::new(20.0, 20.0, 30.0, 40.0);
    /// Margins for pie charts.
    pub const PIE: Self = Self::uniform(20.0);
    /// Margins for radar charts, leaving room for spoke labels.
    pub const RADAR: Self = Self::uniform(50.0);
    /// Margins for candlestick charts, leaving room for rotated date labels.
    pub const CANDLESTICK: Self = Self::new(20.0, 20.0, 50.0, 50.0);
    /// Margins for bubble charts.
    pub const BUBBLE: Self = Self::new(20.0, 20.0, 40.0, 40.0);

    /// Creates margins in CSS order: top, right, bottom, left.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates equal margins on all sides.
    pub const fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::CARTESIAN
    }
}

/// Where to place the legend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendOrient {
    /// To the right of the plot; the plot shrinks to make room.
    #[default]
    Right,
    /// Inside the upper-right corner of the plot.
    TopRight,
}

/// Legend placement options (orientation + offset).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendPlacement {
    /// Legend orientation.
    pub orient: LegendOrient,
    /// Offset away from the plot (or inward for corners).
    pub offset: f64,
}

impl Default for LegendPlacement {
    fn default() -> Self {
        Self {
            orient: LegendOrient::Right,
            offset: 18.0,
        }
    }
}

/// Layout inputs for a single chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Outer chart size.
    pub view_size: Size,
    /// Margins between the view edge and the plot.
    pub margins: Margins,
    /// An optional legend, given by its desired size and placement.
    pub legend: Option<(Size, LegendPlacement)>,
}

impl ChartLayoutSpec {
    /// Creates a layout spec without a legend.
    pub fn new(view_size: Size, margins: Margins) -> Self {
        Self {
            view_size,
            margins,
            legend: None,
        }
    }

    /// Reserves space for a legend.
    pub fn with_legend(mut self, size: Size, placement: LegendPlacement) -> Self {
        self.legend = Some((size, placement));
        self
    }
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// The plot rectangle that scales map into.
    pub plot: Rect,
    /// Legend rectangle (if any).
    pub legend: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    ///
    /// Sizes that do not fit produce an empty plot rather than a negative one.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let view = Rect::new(
            0.0,
            0.0,
            spec.view_size.width.max(0.0),
            spec.view_size.height.max(0.0),
        );
        let m = spec.margins;
        let mut margin_right = m.right.max(0.0);
        if let Some((size, placement)) = spec.legend
            && placement.orient == LegendOrient::Right
        {
            margin_right += size.width.max(0.0) + placement.offset.max(0.0);
        }

        let x0 = m.left.max(0.0).min(view.x1);
        let y0 = m.top.max(0.0).min(view.y1);
        let plot = Rect::new(
            x0,
            y0,
            (view.x1 - margin_right).max(x0),
            (view.y1 - m.bottom.max(0.0)).max(y0),
        );

        let legend = spec
            .legend
            .map(|(size, placement)| legend_rect(plot, size, placement));

        Self { view, plot, legend }
    }

    /// Returns the center of the plot.
    pub fn center(&self) -> Point {
        self.plot.center()
    }

    /// Returns the radius used by pie and radar charts: half the smaller plot side.
    pub fn radius(&self) -> f64 {
        plot_radius(self.plot)
    }
}

/// Returns half the smaller side of `plot`.
pub fn plot_radius(plot: Rect) -> f64 {
    0.5 * plot.width().abs().min(plot.height().abs())
}

fn legend_rect(plot: Rect, size: Size, placement: LegendPlacement) -> Rect {
    let w = size.width.max(0.0);
    let h = size.height.max(0.0);
    let offset = placement.offset.max(0.0);
    match placement.orient {
        LegendOrient::Right => Rect::new(
            plot.x1 + offset,
            plot.y0,
            plot.x1 + offset + w,
            plot.y0 + h,
        ),
        LegendOrient::TopRight => Rect::new(
            plot.x1 - offset - w,
            plot.y0 + offset,
            plot.x1 - offset,
            plot.y0 + offset + h,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cartesian_margins_inset_the_plot() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec::new(
            Size::new(600.0, 400.0),
            Margins::CARTESIAN,
        ));
        assert_eq!(layout.plot, Rect::new(40.0, 20.0, 580.0, 370.0));
        assert_eq!(layout.view, Rect::new(0.0, 0.0, 600.0, 400.0));
        assert!(layout.legend.is_none());
    }

    #[test]
    fn right_legend_shrinks_the_plot() {
        let spec = ChartLayoutSpec::new(Size::new(600.0, 400.0), Margins::uniform(20.0))
            .with_legend(Size::new(80.0, 60.0), LegendPlacement::default());
        let layout = ChartLayout::arrange(&spec);
        assert_eq!(layout.plot.x1, 600.0 - 20.0 - 80.0 - 18.0);
        let legend = layout.legend.unwrap();
        assert_eq!(legend.x0, layout.plot.x1 + 18.0);
        assert_eq!(legend.width(), 80.0);
    }

    #[test]
    fn radius_is_half_the_smaller_side() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec::new(
            Size::new(500.0, 400.0),
            Margins::RADAR,
        ));
        assert_eq!(layout.radius(), 150.0);
        assert_eq!(layout.center(), Point::new(250.0, 200.0));
    }

    #[test]
    fn oversized_margins_give_an_empty_plot() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec::new(
            Size::new(50.0, 40.0),
            Margins::uniform(30.0),
        ));
        assert_eq!(layout.plot.width(), 0.0);
        assert_eq!(layout.plot.height(), 0.0);
        assert_eq!(layout.radius(), 0.0);
    }
}
