// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candlestick (OHLC) charts with optional volume bars.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartmaster_data::{Dataset, Record, Value, format_month_day};
use kurbo::{Line, Rect};

use crate::axis::AxisGuide;
use crate::domain::{Continuous, categorical_domain, continuous_domain, continuous_domain_multi};
use crate::error::{ChartError, DomainError};
use crate::geometry::{ChartGeometry, complete_rows};
use crate::primitive::{Mark, Primitive, StrokeStyle};
use crate::scale::{ScaleBand, ScaleLinear};
use crate::theme::Theme;
use crate::z_order;

/// Share of the plot height used by volume bars.
const VOLUME_SHARE: f64 = 0.2;
/// Volume bar opacity.
const VOLUME_ALPHA: f32 = 0.3;
/// Tick count the price domain is niced to.
const NICE_COUNT: usize = 10;

/// Direction of one trading period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `close >= open`.
    Bullish,
    /// `close < open`.
    Bearish,
}

impl Direction {
    /// Classifies a period by its open and close.
    pub fn of(open: f64, close: f64) -> Self {
        if close >= open {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }
}

/// Options for a candlestick chart.
#[derive(Clone, Debug, PartialEq)]
pub struct CandlestickChartSpec {
    /// Field holding the period (usually a date).
    pub date: String,
    /// Field holding the opening price.
    pub open: String,
    /// Field holding the high price.
    pub high: String,
    /// Field holding the low price.
    pub low: String,
    /// Field holding the closing price.
    pub close: String,
    /// Optional field holding traded volume.
    pub volume: Option<String>,
    /// Band padding in `[0, 1)`.
    pub padding: f64,
}

impl CandlestickChartSpec {
    /// Creates a spec with the conventional field names `date`, `open`, `high`, `low`,
    /// `close` and `volume`, and band padding `0.7`.
    pub fn new() -> Self {
        Self {
            date: "date".into(),
            open: "open".into(),
            high: "high".into(),
            low: "low".into(),
            close: "close".into(),
            volume: Some("volume".into()),
            padding: 0.7,
        }
    }

    /// Sets the OHLC field names.
    pub fn with_fields(
        mut self,
        date: impl Into<String>,
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.date = date.into();
        self.open = open.into();
        self.high = high.into();
        self.low = low.into();
        self.close = close.into();
        self
    }

    /// Sets the volume field, or disables volume bars with `None`.
    pub fn with_volume(mut self, volume: Option<String>) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the band padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Returns the price domain: `[min(low, open, close), max(high, open, close)]`.
    pub fn price_domain(&self, data: &Dataset) -> Result<Continuous, ChartError> {
        let records = data.records();
        let (open, close) = (self.open.as_str(), self.close.as_str());
        let lo = continuous_domain_multi(records, &[self.low.as_str(), open, close])?;
        let hi = continuous_domain_multi(records, &[self.high.as_str(), open, close])?;
        Ok(Continuous::new(lo.min, hi.max))
    }

    /// Builds the chart geometry.
    ///
    /// Each period gets a body spanning open to close and a wick spanning low to high at
    /// the band center, colored by [`Direction`].
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        let records = data.records();
        let periods = categorical_domain(records, &self.date);
        if periods.is_empty() {
            return Err(DomainError::EmptyInput.into());
        }
        let band_labels: Vec<String> = periods
            .values()
            .iter()
            .map(|key| period_label(records, &self.date, key))
            .collect();
        let band = ScaleBand::new(periods, (plot.x0, plot.x1)).with_padding(self.padding);
        let y = ScaleLinear::new(self.price_domain(data)?.nice(NICE_COUNT), (plot.y1, plot.y0));

        let volume = self.volume.as_deref().and_then(|key| {
            let max = continuous_domain(records, key).ok()?.max;
            let height = plot.height() * VOLUME_SHARE;
            Some((key, ScaleLinear::new(Continuous::new(0.0, max), (0.0, height))))
        });

        let color = |direction| match direction {
            Direction::Bullish => theme.bullish,
            Direction::Bearish => theme.bearish,
        };

        let keys = [
            self.open.as_str(),
            self.high.as_str(),
            self.low.as_str(),
            self.close.as_str(),
        ];
        let mut marks = Vec::with_capacity(3 * data.row_count());
        for (row_key, record, [open, high, low, close]) in complete_rows(data, keys) {
            let Some(period) = record.category(&self.date) else {
                tracing::trace!(row_key, "skipping candle without a period");
                continue;
            };
            let x0 = band.position(&period)?;
            let x1 = x0 + band.bandwidth();
            let mid = 0.5 * (x0 + x1);
            let direction = Direction::of(open, close);
            let fill = color(direction);

            marks.push(Mark::for_row(
                row_key,
                z_order::SERIES_STROKE,
                Primitive::Segment {
                    line: Line::new((mid, y.map(high)), (mid, y.map(low))),
                    stroke: StrokeStyle::solid(fill, 1.0),
                },
            ));
            marks.push(Mark::for_row(
                row_key,
                z_order::SERIES_FILL,
                Primitive::Rect {
                    rect: Rect::new(x0, y.map(open.max(close)), x1, y.map(open.min(close))),
                    fill: fill.into(),
                },
            ));
            if let Some((key, scale)) = &volume
                && let Some(v) = record.f64(key)
            {
                marks.push(Mark::for_row(
                    row_key,
                    z_order::SERIES_UNDERLAY,
                    Primitive::Rect {
                        rect: Rect::new(x0, plot.y1 - scale.map(v.max(0.0)), x1, plot.y1),
                        fill: fill.with_alpha(VOLUME_ALPHA).into(),
                    },
                ));
            }
        }

        tracing::debug!(
            kind = "candlestick",
            records = data.row_count(),
            marks = marks.len(),
            "built chart"
        );
        Ok(ChartGeometry {
            plot,
            marks,
            x_axis: Some(
                AxisGuide::bottom_band(band)
                    .with_band_labels(band_labels)
                    .with_label_angle(-45.0),
            ),
            y_axis: Some(AxisGuide::left_linear(y).with_grid(true)),
            legend: None,
        })
    }
}

impl Default for CandlestickChartSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis label for a period: `Jan 05` for dates, the category key otherwise.
fn period_label(records: &[Record], field: &str, key: &str) -> String {
    records
        .iter()
        .filter_map(|r| r.get(field))
        .find(|v| v.category_key() == key)
        .map_or_else(
            || key.into(),
            |v| match v {
                Value::Date(ms) => format_month_day(*ms),
                other => other.category_key(),
            },
        )
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use chartmaster_data::days_from_civil;

    use super::*;

    const MS_PER_DAY: i64 = 86_400_000;

    fn day(d: u32) -> Value {
        Value::Date(days_from_civil(2024, 1, d) * MS_PER_DAY)
    }

    fn candle(d: u32, o: f64, h: f64, l: f64, c: f64, v: f64) -> Record {
        Record::new()
            .with("date", day(d))
            .with("open", o)
            .with("high", h)
            .with("low", l)
            .with("close", c)
            .with("volume", v)
    }

    fn data() -> Dataset {
        Dataset::new(vec![
            candle(1, 100.0, 110.0, 95.0, 105.0, 1000.0),
            candle(2, 105.0, 108.0, 90.0, 92.0, 2000.0),
        ])
    }

    #[test]
    fn bodies_and_wicks_follow_prices() {
        let plot = Rect::new(0.0, 0.0, 200.0, 200.0);
        let theme = Theme::light();
        let g = CandlestickChartSpec::new().build(&data(), plot, &theme).unwrap();

        let Some(AxisGuide {
            scale: crate::axis::AxisScale::Linear(y),
            ..
        }) = &g.y_axis
        else {
            panic!("linear y axis");
        };
        assert_eq!(y.domain(), Continuous::new(90.0, 110.0));

        let first: Vec<_> = g.marks_for_row(0).collect();
        assert_eq!(first.len(), 3);
        let Primitive::Segment { line, stroke } = &first[0].primitive else {
            panic!("wick first");
        };
        assert_eq!((line.p0.y, line.p1.y), (0.0, 150.0));
        assert_eq!(stroke.brush, theme.bullish.into());
        let Primitive::Rect { rect, .. } = &first[1].primitive else {
            panic!("then the body");
        };
        assert_eq!((rect.y0, rect.y1), (50.0, 100.0));
        assert!((rect.width() - 100.0 / 1.7).abs() < 1e-9);
        assert_eq!(line.p0.x, rect.center().x);

        let Primitive::Rect { fill, .. } = &g.marks_for_row(1).nth(1).unwrap().primitive else {
            panic!("second body");
        };
        assert_eq!(*fill, theme.bearish.into());
    }

    #[test]
    fn volume_bars_use_the_bottom_fifth() {
        let plot = Rect::new(0.0, 0.0, 200.0, 200.0);
        let g = CandlestickChartSpec::new()
            .build(&data(), plot, &Theme::light())
            .unwrap();
        let volumes: Vec<Rect> = g
            .marks
            .iter()
            .filter(|m| m.z_index == z_order::SERIES_UNDERLAY)
            .filter_map(|m| match m.primitive {
                Primitive::Rect { rect, .. } => Some(rect),
                _ => None,
            })
            .collect();
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[1].y0, 160.0);
        assert_eq!(volumes[0].y0, 180.0);

        let g = CandlestickChartSpec::new()
            .with_volume(None)
            .build(&data(), plot, &Theme::light())
            .unwrap();
        assert!(g.marks.iter().all(|m| m.z_index != z_order::SERIES_UNDERLAY));
    }

    #[test]
    fn date_labels_are_rotated_month_days() {
        let plot = Rect::new(0.0, 0.0, 200.0, 200.0);
        let g = CandlestickChartSpec::new()
            .build(&data(), plot, &Theme::light())
            .unwrap();
        let axis = g.x_axis.unwrap();
        assert_eq!(axis.label_angle, -45.0);
        let labels: Vec<_> = axis.ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["Jan 01", "Jan 02"]);
    }

    #[test]
    fn direction_treats_unchanged_as_bullish() {
        assert_eq!(Direction::of(1.0, 1.0), Direction::Bullish);
        assert_eq!(Direction::of(2.0, 1.0), Direction::Bearish);
    }
}
