// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip content and pointer hit testing.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chartmaster_data::{Dataset, Record, Value, format_long_date};
use kurbo::Point;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::chart_spec::ChartSpec;
use crate::config::InteractionConfig;
use crate::geometry::ChartGeometry;

/// Tooltip content for one hovered row.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Row key of the hovered record.
    pub row_key: u64,
    /// Pointer position the tooltip follows.
    pub anchor: Point,
    /// Text lines, header first.
    pub lines: Vec<String>,
}

/// Returns the row key of the topmost mark under `pt`.
///
/// Marks without a row key (gridlines, axes, legends) never match. Among overlapping
/// marks the one with the highest z-index wins, and within a layer the one built last.
pub fn hit_test(geometry: &ChartGeometry, pt: Point) -> Option<u64> {
    geometry
        .marks
        .iter()
        .enumerate()
        .filter(|(_, m)| m.row_key.is_some() && m.primitive.contains(pt))
        .max_by_key(|(i, m)| (m.z_index, *i))
        .and_then(|(_, m)| m.row_key)
}

/// Returns the tooltip for the row under `pt`, or `None` when tooltips are disabled or
/// nothing is hit.
pub fn tooltip_at(
    spec: &ChartSpec,
    geometry: &ChartGeometry,
    data: &Dataset,
    pt: Point,
    interaction: &InteractionConfig,
) -> Option<Tooltip> {
    if !interaction.show_tooltip {
        return None;
    }
    let row_key = hit_test(geometry, pt)?;
    let record = data.record_for_key(row_key)?;
    Some(Tooltip {
        row_key,
        anchor: pt,
        lines: tooltip_lines(spec, record),
    })
}

/// Returns the tooltip text for `record` under `spec`.
///
/// Candlesticks show a long-date header, prices with two decimals and volume with
/// thousands separators. Bubbles show their label then `X`, `Y`, `Value` and `Category`.
/// Other charts list `field: value` for each field they read. Absent fields are skipped.
pub fn tooltip_lines(spec: &ChartSpec, record: &Record) -> Vec<String> {
    let field = |key: &str| record.get(key).map(|v| format!("{key}: {v}"));
    match spec {
        ChartSpec::Line(s) => [field(&s.x), field(&s.y)].into_iter().flatten().collect(),
        ChartSpec::Area(s) => [field(&s.x), field(&s.y)].into_iter().flatten().collect(),
        ChartSpec::Bar(s) => [field(&s.x), field(&s.y)].into_iter().flatten().collect(),
        ChartSpec::Pie(s) => [
            record.get(&s.label).map(ToString::to_string),
            field(&s.value),
        ]
        .into_iter()
        .flatten()
        .collect(),
        ChartSpec::Scatter(s) => [
            s.group.as_deref().and_then(|g| record.get(g)).map(ToString::to_string),
            field(&s.x),
            field(&s.y),
        ]
        .into_iter()
        .flatten()
        .collect(),
        ChartSpec::Bubble(s) => {
            let labeled = |name: &str, key: Option<&str>| {
                key.and_then(|k| record.get(k)).map(|v| format!("{name}: {v}"))
            };
            [
                s.label.as_deref().and_then(|k| record.get(k)).map(ToString::to_string),
                labeled("X", Some(s.x.as_str())),
                labeled("Y", Some(s.y.as_str())),
                labeled("Value", Some(s.size.as_str())),
                labeled("Category", s.category.as_deref()),
            ]
            .into_iter()
            .flatten()
            .collect()
        }
        ChartSpec::Candlestick(s) => {
            let price =
                |name: &str, key: &str| record.f64(key).map(|v| format!("{name}: {v:.2}"));
            let header = record.get(&s.date).map(|v| match v {
                Value::Date(ms) => format_long_date(*ms),
                other => other.to_string(),
            });
            let volume = s
                .volume
                .as_deref()
                .and_then(|k| record.f64(k))
                .map(|v| format!("Volume: {}", thousands(v)));
            [
                header,
                price("Open", &s.open),
                price("High", &s.high),
                price("Low", &s.low),
                price("Close", &s.close),
                volume,
            ]
            .into_iter()
            .flatten()
            .collect()
        }
        ChartSpec::Radar(s) => {
            let header = record.get(&s.name).map(ToString::to_string);
            let features: Vec<String> = match &s.features {
                Some(f) => f.clone(),
                None => record
                    .iter()
                    .filter(|(k, v)| *k != s.name && v.as_f64().is_some())
                    .map(|(k, _)| k.to_string())
                    .collect(),
            };
            header
                .into_iter()
                .chain(features.iter().filter_map(|k| field(k)))
                .collect()
        }
    }
}

/// Formats `v` rounded to an integer with `,` between digit groups.
fn thousands(v: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "volumes are far below the i64 range"
    )]
    let n = v.round() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
