// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis and gridline generation.
//!
//! An [`AxisGuide`] pairs a scale with an orientation. It produces tick positions with
//! formatted labels, and from those the rule, tick, label and gridline marks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};
use peniko::Brush;

use crate::primitive::{Label, Mark, Primitive, StrokeStyle, TextAnchor, TextBaseline};
use crate::scale::{ScaleBand, ScaleLinear};
use crate::theme::Theme;
use crate::ticks::{DEFAULT_TICK_COUNT, format_tick};
use crate::z_order;

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Style for gridlines.
    pub grid: StrokeStyle,
}

impl AxisStyle {
    /// Derives axis colors from a theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            rule: StrokeStyle::solid(theme.axis_text, 1.0),
            label_fill: theme.axis_text.into(),
            label_font_size: 12.0,
            grid: StrokeStyle::solid(theme.grid, 1.0),
        }
    }
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::light())
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis below the plot.
    Bottom,
    /// A vertical axis left of the plot.
    Left,
}

/// The scale an axis describes.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// Ticks at nice values.
    Linear(ScaleLinear),
    /// One tick per category at the band center.
    Band(ScaleBand),
}

/// A tick position with its label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Tick value. For band axes this is the category index.
    pub value: f64,
    /// Pixel offset along the axis.
    pub offset: f64,
    /// Formatted label.
    pub label: String,
}

/// An axis description.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisGuide {
    /// Axis placement.
    pub orient: AxisOrient,
    /// The scale the axis describes.
    pub scale: AxisScale,
    /// Approximate tick count for linear scales.
    pub tick_count: usize,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Whether to draw tick labels.
    pub labels: bool,
    /// Whether to draw gridlines across the plot.
    pub grid: bool,
    /// Tick label rotation in degrees.
    pub label_angle: f64,
    /// Replacement labels for band categories, by index.
    pub band_labels: Option<Vec<String>>,
}

impl AxisGuide {
    /// Creates an axis for `scale`.
    pub fn new(orient: AxisOrient, scale: AxisScale) -> Self {
        Self {
            orient,
            scale,
            tick_count: DEFAULT_TICK_COUNT,
            tick_size: 6.0,
            tick_padding: 3.0,
            labels: true,
            grid: false,
            label_angle: 0.0,
            band_labels: None,
        }
    }

    /// A bottom axis over a linear scale.
    pub fn bottom_linear(scale: ScaleLinear) -> Self {
        Self::new(AxisOrient::Bottom, AxisScale::Linear(scale))
    }

    /// A bottom axis over a band scale.
    pub fn bottom_band(scale: ScaleBand) -> Self {
        Self::new(AxisOrient::Bottom, AxisScale::Band(scale))
    }

    /// A left axis over a linear scale.
    pub fn left_linear(scale: ScaleLinear) -> Self {
        Self::new(AxisOrient::Left, AxisScale::Linear(scale))
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set the tick size.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Enable or disable tick labels.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Enable or disable gridlines.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Set the tick label rotation in degrees.
    pub fn with_label_angle(mut self, angle: f64) -> Self {
        self.label_angle = angle;
        self
    }

    /// Replace band category labels (e.g. formatted dates).
    pub fn with_band_labels(mut self, labels: Vec<String>) -> Self {
        self.band_labels = Some(labels);
        self
    }

    /// Returns the ticks that fall within the scale's range.
    pub fn ticks(&self) -> Vec<AxisTick> {
        match &self.scale {
            AxisScale::Linear(scale) => {
                let ticks = scale.ticks(self.tick_count);
                let step = ticks.step();
                let (r0, r1) = scale.range();
                let (lo, hi) = (r0.min(r1) - 1e-9, r0.max(r1) + 1e-9);
                ticks
                    .map(|v| (v, scale.map(v)))
                    .filter(|&(_, offset)| offset >= lo && offset <= hi)
                    .map(|(value, offset)| AxisTick {
                        value,
                        offset,
                        label: format_tick(value, step),
                    })
                    .collect()
            }
            AxisScale::Band(scale) => {
                let half = 0.5 * scale.bandwidth();
                scale
                    .categories()
                    .values()
                    .iter()
                    .enumerate()
                    .map(|(i, category)| {
                        let label = self
                            .band_labels
                            .as_ref()
                            .and_then(|labels| labels.get(i))
                            .unwrap_or(category)
                            .clone();
                        #[allow(clippy::cast_precision_loss, reason = "category counts are small")]
                        let value = i as f64;
                        AxisTick {
                            value,
                            offset: scale.x(i) + half,
                            label,
                        }
                    })
                    .collect()
            }
        }
    }

    /// Generates rule, tick, label and gridline marks for a plot rectangle.
    pub fn marks(&self, plot: Rect, style: &AxisStyle) -> Vec<Mark> {
        let ticks = self.ticks();
        let mut out = Vec::with_capacity(3 * ticks.len() + 1);
        let size = self.tick_size.abs();
        let gap = size + self.tick_padding.max(0.0);

        let domain = match self.orient {
            AxisOrient::Bottom => Line::new((plot.x0, plot.y1), (plot.x1, plot.y1)),
            AxisOrient::Left => Line::new((plot.x0, plot.y0), (plot.x0, plot.y1)),
        };
        out.push(segment(domain, &style.rule, z_order::AXIS_RULES));

        for tick in &ticks {
            let (tick_line, grid_line, anchor) = match self.orient {
                AxisOrient::Bottom => {
                    let x = tick.offset;
                    (
                        Line::new((x, plot.y1), (x, plot.y1 + size)),
                        Line::new((x, plot.y0), (x, plot.y1)),
                        Point::new(x, plot.y1 + gap),
                    )
                }
                AxisOrient::Left => {
                    let y = tick.offset;
                    (
                        Line::new((plot.x0 - size, y), (plot.x0, y)),
                        Line::new((plot.x0, y), (plot.x1, y)),
                        Point::new(plot.x0 - gap, y),
                    )
                }
            };
            if self.grid {
                out.push(segment(grid_line, &style.grid, z_order::GRID_LINES));
            }
            out.push(segment(tick_line, &style.rule, z_order::AXIS_RULES));
            if self.labels {
                let (align, baseline) = match self.orient {
                    AxisOrient::Bottom if self.label_angle != 0.0 => {
                        (TextAnchor::End, TextBaseline::Middle)
                    }
                    AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
                    AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
                };
                let label = Label::new(anchor, tick.label.clone(), style.label_fill.clone())
                    .with_font_size(style.label_font_size)
                    .with_align(align, baseline)
                    .with_angle(self.label_angle);
                out.push(Mark::new(z_order::AXIS_LABELS, Primitive::Label(label)));
            }
        }
        out
    }
}

fn segment(line: Line, stroke: &StrokeStyle, z_index: i32) -> Mark {
    Mark::new(
        z_index,
        Primitive::Segment {
            line,
            stroke: stroke.clone(),
        },
    )
}
