// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart dispatch.
//!
//! [`ChartSpec`] is a closed set of chart types. Each variant holds the accessor keys and
//! options for its chart; [`ChartSpec::build`] dispatches to the matching geometry builder.
//! Charts that color by a category (pie, grouped scatter, categorized bubble, radar) also
//! support [`ChartSpec::build_view`], which drops the series hidden in a [`ViewState`]
//! while keeping every remaining series on its original color.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartmaster_data::{Dataset, Transform};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::domain::{Categorical, categorical_domain};
use crate::error::ChartError;
use crate::geometry::ChartGeometry;
use crate::layout::Margins;
use crate::legend::Legend;
use crate::scale::OrdinalColors;
use crate::theme::Theme;
use crate::view_state::ViewState;
use crate::{
    AreaChartSpec, BarChartSpec, BubbleChartSpec, CandlestickChartSpec, LineChartSpec,
    PieChartSpec, RadarChartSpec, ScatterChartSpec,
};

/// The chart type of a [`ChartSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Line chart.
    Line,
    /// Area chart.
    Area,
    /// Bar chart.
    Bar,
    /// Pie or donut chart.
    Pie,
    /// Scatter plot.
    Scatter,
    /// Bubble chart.
    Bubble,
    /// Candlestick chart.
    Candlestick,
    /// Radar chart.
    Radar,
}

impl ChartKind {
    /// All kinds, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Line,
        Self::Bar,
        Self::Pie,
        Self::Area,
        Self::Scatter,
        Self::Bubble,
        Self::Candlestick,
        Self::Radar,
    ];

    /// Returns the lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Area => "area",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
            Self::Candlestick => "candlestick",
            Self::Radar => "radar",
        }
    }
}

/// A chart description of any supported type.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartSpec {
    /// Line chart.
    Line(LineChartSpec),
    /// Area chart.
    Area(AreaChartSpec),
    /// Bar chart.
    Bar(BarChartSpec),
    /// Pie or donut chart.
    Pie(PieChartSpec),
    /// Scatter plot.
    Scatter(ScatterChartSpec),
    /// Bubble chart.
    Bubble(BubbleChartSpec),
    /// Candlestick chart.
    Candlestick(CandlestickChartSpec),
    /// Radar chart.
    Radar(RadarChartSpec),
}

impl ChartSpec {
    /// Returns the chart type.
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Line(_) => ChartKind::Line,
            Self::Area(_) => ChartKind::Area,
            Self::Bar(_) => ChartKind::Bar,
            Self::Pie(_) => ChartKind::Pie,
            Self::Scatter(_) => ChartKind::Scatter,
            Self::Bubble(_) => ChartKind::Bubble,
            Self::Candlestick(_) => ChartKind::Candlestick,
            Self::Radar(_) => ChartKind::Radar,
        }
    }

    /// Returns the margins this chart type reserves around its plot.
    pub fn margins(&self) -> Margins {
        match self {
            Self::Pie(_) => Margins::PIE,
            Self::Radar(_) => Margins::RADAR,
            Self::Candlestick(_) => Margins::CANDLESTICK,
            Self::Bubble(_) => Margins::BUBBLE,
            Self::Line(_) | Self::Area(_) | Self::Bar(_) | Self::Scatter(_) => {
                Margins::CARTESIAN
            }
        }
    }

    /// Returns the field whose categories form the legend, if this chart has one.
    pub fn series_key(&self) -> Option<&str> {
        match self {
            Self::Pie(s) => Some(&s.label),
            Self::Scatter(s) => s.group.as_deref(),
            Self::Bubble(s) => s.category.as_deref(),
            Self::Radar(s) => Some(&s.name),
            Self::Line(_) | Self::Area(_) | Self::Bar(_) | Self::Candlestick(_) => None,
        }
    }

    /// Returns the pinned color domain, if any.
    pub fn color_domain(&self) -> Option<&Categorical> {
        match self {
            Self::Pie(s) => s.color_domain.as_ref(),
            Self::Scatter(s) => s.color_domain.as_ref(),
            Self::Bubble(s) => s.color_domain.as_ref(),
            Self::Radar(s) => s.color_domain.as_ref(),
            Self::Line(_) | Self::Area(_) | Self::Bar(_) | Self::Candlestick(_) => None,
        }
    }

    /// Pins the category order used for colors. Charts without a series key ignore it.
    #[must_use]
    pub fn with_color_domain(self, domain: Categorical) -> Self {
        match self {
            Self::Pie(s) => Self::Pie(s.with_color_domain(domain)),
            Self::Scatter(s) => Self::Scatter(s.with_color_domain(domain)),
            Self::Bubble(s) => Self::Bubble(s.with_color_domain(domain)),
            Self::Radar(s) => Self::Radar(s.with_color_domain(domain)),
            other => other,
        }
    }

    /// Applies the style settings of `config` that live on the spec (line and area stroke
    /// width).
    #[must_use]
    pub fn with_config(self, config: &ChartConfig) -> Self {
        let width = config.style.stroke_width;
        match self {
            Self::Line(s) => Self::Line(s.with_stroke_width(width)),
            Self::Area(s) => Self::Area(s.with_stroke_width(width)),
            other => other,
        }
    }

    /// Builds the geometry without treating empty input specially.
    pub fn try_build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        match self {
            Self::Line(s) => s.build(data, plot, theme),
            Self::Area(s) => s.build(data, plot, theme),
            Self::Bar(s) => s.build(data, plot, theme),
            Self::Pie(s) => s.build(data, plot, theme),
            Self::Scatter(s) => s.build(data, plot, theme),
            Self::Bubble(s) => s.build(data, plot, theme),
            Self::Candlestick(s) => s.build(data, plot, theme),
            Self::Radar(s) => s.build(data, plot, theme),
        }
    }

    /// Builds the geometry. Empty input (no records, or no usable values) produces an
    /// empty geometry rather than an error.
    pub fn build(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
    ) -> Result<ChartGeometry, ChartError> {
        if data.is_empty() {
            tracing::debug!(kind = self.kind().name(), "no records, empty geometry");
            return Ok(ChartGeometry::empty(plot));
        }
        match self.try_build(data, plot, theme) {
            Err(ChartError::EmptyInput) => {
                tracing::debug!(kind = self.kind().name(), "no usable values, empty geometry");
                Ok(ChartGeometry::empty(plot))
            }
            other => other,
        }
    }

    /// Builds the geometry with the series hidden in `view` removed.
    ///
    /// Colors and legend ids come from the categories of the full dataset, so hiding a
    /// series never recolors the others. The legend lists every series, with hidden ones
    /// inactive.
    pub fn build_view(
        &self,
        data: &Dataset,
        plot: Rect,
        theme: &Theme,
        view: &ViewState,
    ) -> Result<ChartGeometry, ChartError> {
        let Some(key) = self.series_key() else {
            return self.build(data, plot, theme);
        };
        if view.hidden.is_empty() {
            return self.build(data, plot, theme);
        }
        let domain = self
            .color_domain()
            .cloned()
            .unwrap_or_else(|| categorical_domain(data.records(), key));
        let hidden: Vec<String> = view
            .hidden
            .iter()
            .filter_map(|id| {
                let index = usize::try_from(*id).ok()?;
                domain.values().get(index).cloned()
            })
            .collect();
        let visible = Transform::Exclude {
            key: key.into(),
            hidden,
        }
        .apply(data);
        tracing::debug!(
            kind = self.kind().name(),
            hidden = view.hidden.len(),
            visible = visible.row_count(),
            "building filtered view"
        );

        let mut geometry = self
            .clone()
            .with_color_domain(domain.clone())
            .build(&visible, plot, theme)?;
        let colors = OrdinalColors::new(domain, theme.categorical.clone());
        geometry.legend = Some(Legend::from_colors(&colors, &view.hidden, theme.axis_text));
        Ok(geometry)
    }
}

macro_rules! impl_from_spec {
    ($($spec:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$spec> for ChartSpec {
                fn from(spec: $spec) -> Self {
                    Self::$variant(spec)
                }
            }
        )*
    };
}

impl_from_spec!(
    LineChartSpec => Line,
    AreaChartSpec => Area,
    BarChartSpec => Bar,
    PieChartSpec => Pie,
    ScatterChartSpec => Scatter,
    BubbleChartSpec => Bubble,
    CandlestickChartSpec => Candlestick,
    RadarChartSpec => Radar,
);
