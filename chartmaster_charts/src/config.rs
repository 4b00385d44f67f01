// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-adjustable chart settings.
//!
//! [`ChartConfig`] serializes with camelCase keys. [`ChartConfig::set`] addresses a setting
//! by a dotted path such as `style.strokeWidth`; path segments match case-insensitively and
//! ignore underscores, so `style.stroke_width` names the same setting.

extern crate alloc;

use alloc::string::{String, ToString};

use peniko::Color;
use serde::{Deserialize, Serialize};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::AxisStyle;
use crate::error::ConfigError;
use crate::geometry::ChartGeometry;
use crate::primitive::StrokeStyle;
use crate::theme::{Theme, parse_hex_color};

/// Series styling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    /// Primary series color as `#RRGGBB`.
    pub series_color: String,
    /// Gridline color as `#RRGGBB`.
    pub grid_color: String,
    /// Line width for line-like series.
    pub stroke_width: f64,
    /// Series opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Axis settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxesConfig {
    /// Whether to draw gridlines.
    pub show_grid: bool,
    /// Whether to draw tick labels.
    pub show_labels: bool,
    /// Tick line length.
    pub tick_size: f64,
}

/// Entry animation settings, for surfaces that animate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Whether to animate.
    pub enabled: bool,
    /// Animation length in milliseconds.
    pub duration: u64,
}

/// Interaction switches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionConfig {
    /// Whether zoom events change the view.
    pub zoom_enabled: bool,
    /// Whether pan events change the view.
    pub pan_enabled: bool,
    /// Whether hovering shows a tooltip.
    pub show_tooltip: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            pan_enabled: true,
            show_tooltip: true,
        }
    }
}

/// All chart settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Series styling.
    pub style: StyleConfig,
    /// Axis settings.
    pub axes: AxesConfig,
    /// Animation settings.
    pub animation: AnimationConfig,
    /// Interaction switches.
    pub interaction: InteractionConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            style: StyleConfig {
                series_color: "#3B82F6".into(),
                grid_color: "#E5E7EB".into(),
                stroke_width: 2.0,
                opacity: 0.8,
            },
            axes: AxesConfig {
                show_grid: true,
                show_labels: true,
                tick_size: 5.0,
            },
            animation: AnimationConfig {
                enabled: true,
                duration: 1000,
            },
            interaction: InteractionConfig::default(),
        }
    }
}

/// A value assigned through [`ChartConfig::set`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A number.
    Number(f64),
    /// A flag.
    Bool(bool),
    /// Text, used for colors.
    Text(String),
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn normalize(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl ChartConfig {
    /// Sets one setting by dotted path.
    ///
    /// Colors must be `#RGB` or `#RRGGBB`, opacity must lie in `[0, 1]`, and sizes and
    /// durations must be finite and non-negative. On error the config is unchanged.
    pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) -> Result<(), ConfigError> {
        let value = value.into();
        let mismatch = |expected| ConfigError::TypeMismatch {
            path: path.to_string(),
            expected,
        };
        let Some((section, field)) = path.split_once('.') else {
            return Err(ConfigError::UnknownPath(path.to_string()));
        };
        let as_color = || color(&value).ok_or_else(|| mismatch("a hex color"));
        let as_flag = || flag(&value).ok_or_else(|| mismatch("a boolean"));
        let as_size = || non_negative(&value).ok_or_else(|| mismatch("a non-negative number"));
        match (normalize(section).as_str(), normalize(field).as_str()) {
            ("style", "seriescolor") => self.style.series_color = as_color()?,
            ("style", "gridcolor") => self.style.grid_color = as_color()?,
            ("style", "strokewidth") => self.style.stroke_width = as_size()?,
            ("style", "opacity") => {
                self.style.opacity = non_negative(&value)
                    .filter(|v| *v <= 1.0)
                    .ok_or_else(|| mismatch("a number in [0, 1]"))?;
            }
            ("axes", "showgrid") => self.axes.show_grid = as_flag()?,
            ("axes", "showlabels") => self.axes.show_labels = as_flag()?,
            ("axes", "ticksize") => self.axes.tick_size = as_size()?,
            ("animation", "enabled") => self.animation.enabled = as_flag()?,
            ("animation", "duration") => {
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "the value is finite and non-negative"
                )]
                let ms = as_size()?.round() as u64;
                self.animation.duration = ms;
            }
            ("interaction", "zoomenabled") => self.interaction.zoom_enabled = as_flag()?,
            ("interaction", "panenabled") => self.interaction.pan_enabled = as_flag()?,
            ("interaction", "showtooltip") => self.interaction.show_tooltip = as_flag()?,
            _ => return Err(ConfigError::UnknownPath(path.to_string())),
        }
        tracing::debug!(path, value = ?value, "updated chart config");
        Ok(())
    }

    /// Returns `theme` with the configured series color, opacity and grid color applied.
    ///
    /// The primary series color takes `style.opacity` as its alpha. An unparseable series
    /// color keeps the theme's primary color (still with the configured opacity); an
    /// unparseable grid color keeps the theme's grid color.
    pub fn apply_to_theme(&self, theme: &Theme) -> Theme {
        let mut out = theme.clone();
        let series = self.series_color(theme);
        match out.series.first_mut() {
            Some(first) => *first = series,
            None => out.series.push(series),
        }
        if let Some(c) = parse_hex_color(&self.style.grid_color) {
            out.grid = c;
        }
        out
    }

    /// Returns the series color with the configured opacity.
    pub fn series_color(&self, theme: &Theme) -> Color {
        #[allow(clippy::cast_possible_truncation, reason = "opacity is in [0, 1]")]
        let alpha = self.style.opacity.clamp(0.0, 1.0) as f32;
        parse_hex_color(&self.style.series_color)
            .unwrap_or_else(|| theme.primary())
            .with_alpha(alpha)
    }

    /// Applies the axis settings to built geometry.
    ///
    /// Turning gridlines off removes them from every axis; turning them on keeps each
    /// chart type's default.
    pub fn apply_to_geometry(&self, geometry: &mut ChartGeometry) {
        for axis in geometry.x_axis.iter_mut().chain(geometry.y_axis.iter_mut()) {
            axis.tick_size = self.axes.tick_size;
            axis.labels = self.axes.show_labels;
            axis.grid &= self.axes.show_grid;
        }
    }

    /// Returns axis styling for `theme` with the configured grid color.
    pub fn axis_style(&self, theme: &Theme) -> AxisStyle {
        let mut style = AxisStyle::from_theme(theme);
        if let Some(c) = parse_hex_color(&self.style.grid_color) {
            style.grid = StrokeStyle::solid(c, style.grid.stroke_width);
        }
        style
    }
}

fn color(value: &ConfigValue) -> Option<String> {
    match value {
        ConfigValue::Text(s) if parse_hex_color(s).is_some() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn flag(value: &ConfigValue) -> Option<bool> {
    match value {
        ConfigValue::Bool(b) => Some(*b),
        _ => None,
    }
}

fn non_negative(value: &ConfigValue) -> Option<f64> {
    match value {
        ConfigValue::Number(v) if v.is_finite() && *v >= 0.0 => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn defaults_match_the_settings_panel() {
        let c = ChartConfig::default();
        assert_eq!(c.style.stroke_width, 2.0);
        assert_eq!(c.style.opacity, 0.8);
        assert_eq!(c.axes.tick_size, 5.0);
        assert_eq!(c.animation.duration, 1000);
        assert!(c.interaction.zoom_enabled && c.interaction.pan_enabled);
    }

    #[test]
    fn dotted_paths_accept_both_spellings() {
        let mut c = ChartConfig::default();
        c.set("style.stroke_width", 3.0).unwrap();
        assert_eq!(c.style.stroke_width, 3.0);
        c.set("style.strokeWidth", 4.0).unwrap();
        assert_eq!(c.style.stroke_width, 4.0);
        c.set("interaction.zoomEnabled", false).unwrap();
        assert!(!c.interaction.zoom_enabled);
        c.set("style.seriesColor", "#10B981").unwrap();
        assert_eq!(c.style.series_color, "#10B981");
        c.set("animation.duration", 250.4).unwrap();
        assert_eq!(c.animation.duration, 250);
    }

    #[test]
    fn bad_paths_and_values_leave_the_config_unchanged() {
        let mut c = ChartConfig::default();
        assert_eq!(
            c.set("style.nope", 1.0),
            Err(ConfigError::UnknownPath("style.nope".into()))
        );
        assert_eq!(c.set("style", 1.0), Err(ConfigError::UnknownPath("style".into())));
        assert!(matches!(
            c.set("axes.showGrid", 1.0),
            Err(ConfigError::TypeMismatch { expected: "a boolean", .. })
        ));
        assert!(c.set("style.opacity", 1.5).is_err());
        assert!(c.set("style.gridColor", "blue").is_err());
        assert_eq!(c, ChartConfig::default());
    }

    #[test]
    fn config_round_trips_with_camel_case_keys() {
        let c = ChartConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"seriesColor\":\"#3B82F6\""));
        assert!(json.contains("\"zoomEnabled\":true"));
        let back: ChartConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn axis_settings_reach_built_geometry() {
        use chartmaster_data::{Dataset, Record};
        use kurbo::Rect;

        let data = Dataset::new(alloc::vec![
            Record::new().with("x", 0.0).with("y", 1.0),
            Record::new().with("x", 1.0).with("y", 2.0),
        ]);
        let mut g = crate::LineChartSpec::new("x", "y")
            .build(&data, Rect::new(0.0, 0.0, 100.0, 100.0), &Theme::light())
            .unwrap();
        let mut c = ChartConfig::default();
        c.set("axes.showGrid", false).unwrap();
        c.set("axes.tickSize", 8.0).unwrap();
        c.apply_to_geometry(&mut g);
        let y = g.y_axis.unwrap();
        assert!(!y.grid);
        assert_eq!(y.tick_size, 8.0);
    }

    #[test]
    fn theme_overrides_apply() {
        let mut c = ChartConfig::default();
        c.set("style.seriesColor", "#000").unwrap();
        let theme = c.apply_to_theme(&Theme::light());
        assert_eq!(theme.primary(), Color::from_rgb8(0, 0, 0).with_alpha(0.8));
        assert_eq!(theme.series[1], Theme::light().series[1]);
    }

    #[test]
    fn opacity_reaches_the_theme_and_built_marks() {
        let mut c = ChartConfig::default();
        c.set("style.opacity", 0.5).unwrap();
        c.set("style.seriesColor", "not a color").unwrap_err();
        let theme = c.apply_to_theme(&Theme::light());
        assert_eq!(theme.primary().components[3], 0.5);

        let data = chartmaster_data::Dataset::new(alloc::vec![
            chartmaster_data::Record::new().with("k", "a").with("v", 1.0),
        ]);
        let g = crate::BarChartSpec::new("k", "v")
            .build(&data, kurbo::Rect::new(0.0, 0.0, 100.0, 100.0), &theme)
            .unwrap();
        let crate::Primitive::Rect { fill, .. } = &g.marks[0].primitive else {
            panic!("bar charts draw rectangles");
        };
        assert_eq!(*fill, theme.primary().into());
    }
}
