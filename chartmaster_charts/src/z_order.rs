// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Every [`Mark`](crate::Mark) carries an explicit `z_index`. Builders use these values so
//! that guides, series and labels paint in a consistent order across chart types.
//!
//! These values are intentionally coarse. Renderers should sort stably by `z_index` so
//! marks within a layer keep their input order.

/// Gridlines, radar levels and spokes drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Secondary fills drawn under the main series (candlestick volume bars).
pub const SERIES_UNDERLAY: i32 = -10;
/// Filled series marks (bars, areas, slices, candle bodies).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (lines, wicks, radar outlines).
pub const SERIES_STROKE: i32 = 10;
/// Point series marks drawn above lines.
pub const SERIES_POINTS: i32 = 20;
/// Labels attached to series marks (slice and bubble labels).
pub const SERIES_LABELS: i32 = 25;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// User annotations.
pub const ANNOTATIONS: i32 = 80;
