// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series legends.
//!
//! A legend lists the categories of a series key with their colors. Each item has a
//! stable id (its index in the full, unfiltered domain) that the view state's hidden set
//! refers to, so toggling a series keeps every other series' color.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::{Brush, Color};

use crate::layout::Size;
use crate::measure::TextMeasurer;
use crate::primitive::{Label, Mark, Primitive, TextAnchor, TextBaseline};
use crate::scale::OrdinalColors;
use crate::z_order;

/// Alpha applied to swatches of hidden series.
const INACTIVE_ALPHA: f32 = 0.3;

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Series id (index in the series domain).
    pub id: u64,
    /// Category key used to filter records.
    pub key: String,
    /// Label shown next to the swatch.
    pub label: String,
    /// Swatch color.
    pub color: Color,
    /// `false` if the series is hidden.
    pub active: bool,
}

/// A vertical list of color swatches with labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    /// Items in display order.
    pub items: Vec<LegendItem>,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Distance between row origins.
    pub row_height: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
}

impl Legend {
    /// Builds a legend from a color scale, marking `hidden` ids inactive.
    pub fn from_colors(colors: &OrdinalColors, hidden: &BTreeSet<u64>, text: Color) -> Self {
        let items = colors
            .entries()
            .enumerate()
            .map(|(i, (key, color))| {
                let id = i as u64;
                LegendItem {
                    id,
                    key: key.clone(),
                    label: key.clone(),
                    color,
                    active: !hidden.contains(&id),
                }
            })
            .collect();
        Self {
            items,
            swatch_size: 10.0,
            row_height: 20.0,
            label_dx: 5.0,
            font_size: 12.0,
            text_fill: text.into(),
        }
    }

    /// Returns the category keys of hidden items.
    pub fn hidden_keys(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|i| !i.active)
            .map(|i| i.key.clone())
            .collect()
    }

    /// Returns the item with `id`.
    pub fn item(&self, id: u64) -> Option<&LegendItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Measures the desired legend size.
    pub fn measure(&self, measurer: &impl TextMeasurer) -> Size {
        let label_w = self
            .items
            .iter()
            .map(|i| measurer.measure(&i.label, self.font_size).0)
            .fold(0.0_f64, f64::max);
        #[allow(clippy::cast_precision_loss, reason = "legend item counts are small")]
        let rows = self.items.len() as f64;
        Size::new(
            self.swatch_size + self.label_dx + label_w,
            (rows * self.row_height - (self.row_height - self.swatch_size)).max(0.0),
        )
    }

    /// Returns the swatch rectangle of the row at `index` for a legend at `origin`.
    pub fn swatch_rect(&self, origin: Point, index: usize) -> Rect {
        #[allow(clippy::cast_precision_loss, reason = "legend item counts are small")]
        let y = origin.y + index as f64 * self.row_height;
        Rect::new(origin.x, y, origin.x + self.swatch_size, y + self.swatch_size)
    }

    /// Returns the id of the item whose row contains `pt`, for click-to-toggle.
    pub fn hit_test(&self, origin: Point, pt: Point) -> Option<u64> {
        self.items.iter().enumerate().find_map(|(i, item)| {
            let swatch = self.swatch_rect(origin, i);
            let row = Rect::new(swatch.x0, swatch.y0, f64::INFINITY, swatch.y1);
            row.contains(pt).then_some(item.id)
        })
    }

    /// Generates swatch and label marks with the top-left corner at `origin`.
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        let mut out = Vec::with_capacity(2 * self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            let swatch = self.swatch_rect(origin, i);
            let color = if item.active {
                item.color
            } else {
                item.color.with_alpha(INACTIVE_ALPHA)
            };
            out.push(Mark::new(
                z_order::LEGEND_SWATCHES,
                Primitive::Rect {
                    rect: swatch,
                    fill: color.into(),
                },
            ));
            let label = Label::new(
                Point::new(swatch.x1 + self.label_dx, swatch.center().y),
                item.label.clone(),
                self.text_fill.clone(),
            )
            .with_font_size(self.font_size)
            .with_align(TextAnchor::Start, TextBaseline::Middle);
            out.push(Mark::new(z_order::LEGEND_LABELS, Primitive::Label(label)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;
    use crate::domain::Categorical;
    use crate::measure::HeuristicTextMeasurer;

    fn legend(hidden: &[u64]) -> Legend {
        let colors = OrdinalColors::new(
            Categorical::new(["north", "south", "east"]),
            vec![css::RED, css::GREEN, css::BLUE],
        );
        let hidden: BTreeSet<u64> = hidden.iter().copied().collect();
        Legend::from_colors(&colors, &hidden, css::BLACK)
    }

    #[test]
    fn hidden_items_are_inactive_and_keep_their_color() {
        let l = legend(&[1]);
        assert_eq!(l.items.len(), 3);
        let south = l.item(1).unwrap();
        assert!(!south.active);
        assert_eq!(south.color, css::GREEN);
        assert_eq!(l.hidden_keys(), ["south"]);
    }

    #[test]
    fn measure_and_hit_test_follow_rows() {
        let l = legend(&[]);
        let size = l.measure(&HeuristicTextMeasurer);
        assert_eq!(size.height, 50.0);
        assert!((size.width - (15.0 + 0.6 * 12.0 * 5.0)).abs() < 1e-9);

        let origin = Point::new(100.0, 10.0);
        assert_eq!(l.hit_test(origin, Point::new(105.0, 35.0)), Some(1));
        assert_eq!(l.hit_test(origin, Point::new(150.0, 55.0)), Some(2));
        assert_eq!(l.hit_test(origin, Point::new(90.0, 15.0)), None);
    }

    #[test]
    fn marks_dim_inactive_swatches() {
        let l = legend(&[0]);
        let marks = l.marks(Point::ZERO);
        assert_eq!(marks.len(), 6);
        let Primitive::Rect { fill, .. } = &marks[0].primitive else {
            panic!("expected a swatch rect");
        };
        assert_eq!(*fill, Brush::Solid(css::RED.with_alpha(INACTIVE_ALPHA)));
    }
}
