// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales map data values into screen coordinates.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;
use peniko::color::palette::css;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::domain::{Categorical, Continuous};
use crate::error::ScaleError;
use crate::ticks::Ticks;

/// A linear mapping from a continuous domain to a continuous range.
///
/// The range may be reversed, e.g. `(plot.y1, plot.y0)` for a y axis that grows upwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: Continuous,
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: Continuous, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Returns the domain.
    pub fn domain(&self) -> Continuous {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns a copy with the domain extended to nice tick boundaries.
    pub fn nice(self, count: usize) -> Self {
        Self {
            domain: self.domain.nice(count),
            ..self
        }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps every value to the start of the range.
    pub fn map(&self, v: f64) -> f64 {
        let Continuous { min, max } = self.domain;
        let (r0, r1) = self.range;
        if min == max {
            return r0;
        }
        r0 + unit_position(v, min, max) * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    ///
    /// A degenerate range or domain inverts to the domain minimum.
    pub fn invert(&self, px: f64) -> f64 {
        let Continuous { min, max } = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 || min == max {
            return min;
        }
        let t = (px - r0) / denom;
        let span = max - min;
        if span.is_finite() {
            min + t * span
        } else {
            let half = max * 0.5 - min * 0.5;
            min + t * half + t * half
        }
    }

    /// Returns nice tick values for the domain.
    pub fn ticks(&self, count: usize) -> Ticks {
        Ticks::new(self.domain.min, self.domain.max, count)
    }

    /// Returns `(value, offset)` pairs for nice ticks.
    pub fn tick_offsets(&self, count: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ticks(count).map(|v| (v, self.map(v)))
    }
}

/// Returns where `v` falls in `[min, max]`, as a fraction of the span.
///
/// Spans wider than `f64::MAX` are measured in halves so they stay finite.
fn unit_position(v: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span.is_finite() {
        (v - min) / span
    } else {
        (v * 0.5 - min * 0.5) / (max * 0.5 - min * 0.5)
    }
}

/// A band scale over a categorical domain.
///
/// The range is divided into equal slots of width [`ScaleBand::step`]. Each slot holds one
/// band of [`ScaleBand::bandwidth`] followed by a gap of `padding * bandwidth`, so the
/// bands and gaps together fill the range exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    categories: Categorical,
    range: (f64, f64),
    padding: f64,
}

impl ScaleBand {
    /// Creates a band scale with no padding.
    pub fn new(categories: Categorical, range: (f64, f64)) -> Self {
        Self {
            categories,
            range,
            padding: 0.0,
        }
    }

    /// Sets the padding, clamped to `[0, 1)`.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = if padding.is_finite() {
            padding.clamp(0.0, 1.0 - f64::EPSILON)
        } else {
            0.0
        };
        self
    }

    /// Returns the categories.
    pub fn categories(&self) -> &Categorical {
        &self.categories
    }

    /// Returns the padding.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.categories.len()
    }

    /// Returns the slot width (band plus gap).
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count();
        if n == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss, reason = "category counts are small")]
        let n = n as f64;
        (r1 - r0).abs() / n
    }

    /// Returns the band width.
    pub fn bandwidth(&self) -> f64 {
        self.step() / (1.0 + self.padding)
    }

    /// Returns the gap after each band.
    pub fn gap(&self) -> f64 {
        self.padding * self.bandwidth()
    }

    /// Returns the start of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        #[allow(clippy::cast_precision_loss, reason = "category counts are small")]
        let index = index as f64;
        r0.min(r1) + index * self.step()
    }

    /// Returns the position of `category` in the domain.
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.index_of(category)
    }

    /// Returns `true` if `category` is part of the domain.
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Returns the start of the band for `category`.
    ///
    /// An absent category is a caller bug: it trips a debug assertion, and release builds
    /// report it as [`ScaleError::InvalidCategory`].
    pub fn position(&self, category: &str) -> Result<f64, ScaleError> {
        let index = self.index_of(category);
        debug_assert!(index.is_some(), "category {category:?} is not in the band domain");
        index
            .map(|i| self.x(i))
            .ok_or_else(|| ScaleError::InvalidCategory(category.into()))
    }

    /// Returns the center of the band for `category`.
    pub fn center(&self, category: &str) -> Result<f64, ScaleError> {
        Ok(self.position(category)? + 0.5 * self.bandwidth())
    }
}

/// A square-root scale for sizes, so that area (not radius) is proportional to value.
///
/// Maps `[0, max_value]` to `range` by `r0 + sqrt(v / max_value) * (r1 - r0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSqrt {
    max_value: f64,
    range: (f64, f64),
}

impl ScaleSqrt {
    /// Creates a square-root scale.
    pub fn new(max_value: f64, range: (f64, f64)) -> Self {
        Self { max_value, range }
    }

    /// Maps a value to a size. Values at or below zero map to the start of the range.
    pub fn map(&self, v: f64) -> f64 {
        let (r0, r1) = self.range;
        if self.max_value <= 0.0 || !self.max_value.is_finite() || v.is_nan() || v <= 0.0 {
            return r0;
        }
        r0 + (v / self.max_value).sqrt() * (r1 - r0)
    }
}

/// Maps categories onto a palette by first-seen index, cycling when the palette runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalColors {
    domain: Categorical,
    palette: Vec<Color>,
}

impl OrdinalColors {
    /// Creates an ordinal color scale.
    pub fn new(domain: Categorical, palette: Vec<Color>) -> Self {
        Self { domain, palette }
    }

    /// Returns the domain.
    pub fn domain(&self) -> &Categorical {
        &self.domain
    }

    /// Returns the color at a domain index.
    pub fn color_at(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return css::BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    /// Returns the color for a category. Unknown categories use the first color.
    pub fn color(&self, category: &str) -> Color {
        self.color_at(self.domain.index_of(category).unwrap_or(0))
    }

    /// Returns `(category, color)` pairs in domain order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, Color)> + '_ {
        self.domain
            .values()
            .iter()
            .enumerate()
            .map(|(i, c)| (c, self.color_at(i)))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn linear_maps_endpoints_and_midpoint() {
        let x = ScaleLinear::new(Continuous::new(0.0, 2.0), (0.0, 300.0));
        assert_eq!(x.map(0.0), 0.0);
        assert_eq!(x.map(1.0), 150.0);
        assert_eq!(x.map(2.0), 300.0);
    }

    #[test]
    fn linear_reversed_range_and_invert() {
        let y = ScaleLinear::new(Continuous::new(0.0, 35.0), (200.0, 0.0));
        assert_eq!(y.map(0.0), 200.0);
        assert_eq!(y.map(35.0), 0.0);
        for v in [0.0, 3.5, 10.0, 35.0] {
            let back = y.invert(y.map(v));
            assert!((back - v).abs() < 1e-9, "{v} inverted to {back}");
        }
    }

    #[test]
    fn linear_handles_spans_wider_than_f64_max() {
        let s = ScaleLinear::new(Continuous::new(-1e308, 1e308), (0.0, 300.0));
        assert_eq!(s.map(-1e308), 0.0);
        assert_eq!(s.map(0.0), 150.0);
        assert_eq!(s.map(1e308), 300.0);
        assert_eq!(s.invert(150.0), 0.0);
        assert_eq!(s.invert(300.0), 1e308);

        let s = ScaleLinear::new(Continuous::new(-f64::MAX, f64::MAX), (0.0, 300.0));
        assert_eq!(s.map(f64::MAX), 300.0);
        assert_eq!(s.invert(300.0), f64::MAX);
        assert!(s.ticks(5).all(f64::is_finite));
    }

    #[test]
    fn linear_handles_subnormal_spans() {
        let s = ScaleLinear::new(Continuous::new(0.0, 1e-320), (0.0, 300.0));
        assert_eq!(s.map(1e-320), 300.0);
        assert_eq!(s.map(0.0), 0.0);
    }

    #[test]
    fn degenerate_linear_collapses_to_range_start() {
        let s = ScaleLinear::new(Continuous::new(5.0, 5.0), (10.0, 20.0));
        assert_eq!(s.map(5.0), 10.0);
        assert_eq!(s.map(100.0), 10.0);
        assert_eq!(s.invert(15.0), 5.0);
        assert_eq!(s.ticks(5).count(), 1);
    }

    #[test]
    fn tick_offsets_pair_values_with_pixels() {
        let s = ScaleLinear::new(Continuous::new(0.0, 10.0), (0.0, 100.0));
        let ticks: Vec<(f64, f64)> = s.tick_offsets(5).collect();
        assert_eq!(ticks[0], (0.0, 0.0));
        assert_eq!(ticks[ticks.len() - 1], (10.0, 100.0));
    }

    #[test]
    fn band_fills_the_range() {
        let band =
            ScaleBand::new(Categorical::new(["A", "B", "C"]), (0.0, 300.0)).with_padding(0.1);
        let bw = band.bandwidth();
        assert!((bw - 90.909_090).abs() < 1e-3, "bandwidth was {bw}");
        assert!((band.gap() - 9.090_909).abs() < 1e-3, "gap was {}", band.gap());
        let total = 3.0 * bw + 3.0 * band.padding() * bw;
        assert!((total - 300.0).abs() < 1e-9, "total was {total}");
        assert_eq!(band.position("B"), Ok(100.0));
        assert!((band.center("A").unwrap() - 0.5 * bw).abs() < 1e-9);
    }

    #[test]
    fn band_uses_the_lower_end_of_a_reversed_range() {
        let band = ScaleBand::new(Categorical::new(["A", "B"]), (100.0, 0.0));
        assert_eq!(band.x(0), 0.0);
        assert_eq!(band.x(1), 50.0);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn band_reports_unknown_categories() {
        let band = ScaleBand::new(Categorical::new(["A"]), (0.0, 10.0));
        assert_eq!(
            band.position("Z"),
            Err(ScaleError::InvalidCategory("Z".into()))
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not in the band domain")]
    fn band_asserts_on_unknown_categories() {
        let band = ScaleBand::new(Categorical::new(["A"]), (0.0, 10.0));
        let _ = band.position("Z");
    }

    #[test]
    fn sqrt_scale_is_area_proportional() {
        let r = ScaleSqrt::new(400.0, (0.0, 25.0));
        let big = r.map(400.0);
        let small = r.map(100.0);
        assert!((big / small - 2.0).abs() < 1e-9, "ratio was {}", big / small);
        assert_eq!(r.map(-1.0), 0.0);
        assert_eq!(ScaleSqrt::new(0.0, (2.0, 25.0)).map(5.0), 2.0);
    }

    #[test]
    fn ordinal_colors_cycle() {
        let palette = vec![css::RED, css::GREEN];
        let colors = OrdinalColors::new(Categorical::new(["a", "b", "c"]), palette);
        assert_eq!(colors.color("a"), css::RED);
        assert_eq!(colors.color("b"), css::GREEN);
        assert_eq!(colors.color("c"), css::RED);
        assert_eq!(colors.color("unknown"), css::RED);
        assert_eq!(colors.entries().count(), 3);
    }
}
