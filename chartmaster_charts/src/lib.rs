// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart scales, ticks and geometry builders.
//!
//! This crate turns [`chartmaster_data::Dataset`]s into drawable primitives:
//! - **Domains** ([`Continuous`], [`Categorical`]) are derived from records by key.
//! - **Scales** ([`ScaleLinear`], [`ScaleBand`], [`ScaleSqrt`], [`OrdinalColors`]) map
//!   domain values into pixel ranges and palette colors.
//! - **Ticks** ([`Ticks`]) are lazy, round-valued and cover the domain.
//! - **Geometry builders** (one `*ChartSpec` per chart type, dispatched through
//!   [`ChartSpec`]) produce a [`ChartGeometry`]: series [`Mark`]s plus axis and legend
//!   guides.
//! - **Interaction state** ([`ViewState`], [`Annotations`], [`ChartConfig`]) is plain,
//!   serializable data passed in and returned out.
//!
//! Rendering is out of scope; a surface consumes [`Primitive`]s in z order. Text is never
//! shaped here, labels carry unshaped strings and a [`TextMeasurer`] estimates extents.
//!
//! ```
//! use chartmaster_charts::{BarChartSpec, ChartSpec, Theme};
//! use chartmaster_data::{Dataset, Record};
//! use kurbo::Rect;
//!
//! let data = Dataset::new(vec![
//!     Record::new().with("month", "Jan").with("sales", 30.0),
//!     Record::new().with("month", "Feb").with("sales", 50.0),
//! ]);
//! let spec = ChartSpec::from(BarChartSpec::new("month", "sales"));
//! let geometry = spec
//!     .build(&data, Rect::new(0.0, 0.0, 300.0, 200.0), &Theme::light())
//!     .unwrap();
//! assert_eq!(geometry.marks.len(), 2);
//! ```

#![no_std]

extern crate alloc;

mod annotation;
mod area_chart;
mod axis;
mod bar_chart;
mod bubble_chart;
mod candlestick_chart;
mod chart_spec;
mod config;
mod domain;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
#[cfg(test)]
mod geometry_tests;
mod layout;
mod legend;
mod line_chart;
mod measure;
mod pie_chart;
mod primitive;
mod radar_chart;
mod scale;
mod scatter_chart;
mod theme;
mod ticks;
mod tooltip;
mod view_state;
mod z_order;

pub use annotation::{Annotation, Annotations};
pub use area_chart::AreaChartSpec;
pub use axis::{AxisGuide, AxisOrient, AxisScale, AxisStyle, AxisTick};
pub use bar_chart::BarChartSpec;
pub use bubble_chart::BubbleChartSpec;
pub use candlestick_chart::{CandlestickChartSpec, Direction};
pub use chart_spec::{ChartKind, ChartSpec};
pub use config::{
    AnimationConfig, AxesConfig, ChartConfig, ConfigValue, InteractionConfig, StyleConfig,
};
pub use domain::{
    Categorical, Continuous, categorical_domain, continuous_domain, continuous_domain_multi,
};
pub use error::{ChartError, ConfigError, DomainError, ScaleError};
pub use geometry::{ChartGeometry, require_f64};
pub use layout::{
    ChartLayout, ChartLayoutSpec, LegendOrient, LegendPlacement, Margins, Size, plot_radius,
};
pub use legend::{Legend, LegendItem};
pub use line_chart::LineChartSpec;
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use pie_chart::{PIE_START_ANGLE, PieChartSpec, PieSlice, PieSort, pie_slices};
pub use primitive::{Label, Mark, Primitive, StrokeStyle, TextAnchor, TextBaseline, sort_marks};
pub use radar_chart::RadarChartSpec;
pub use scale::{OrdinalColors, ScaleBand, ScaleLinear, ScaleSqrt};
pub use scatter_chart::ScatterChartSpec;
pub use theme::{Theme, ThemeMode, darker, parse_hex_color};
pub use ticks::{DEFAULT_TICK_COUNT, Ticks, format_tick, tick_step};
pub use tooltip::{Tooltip, hit_test, tooltip_at, tooltip_lines};
pub use view_state::{MAX_SCALE, MIN_SCALE, Offset, ViewEvent, ViewState, ZOOM_STEP};
pub use z_order::*;
