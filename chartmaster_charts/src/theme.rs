// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme palettes.
//!
//! A [`Theme`] is plain data passed explicitly into geometry builders. The light and dark
//! defaults below can be replaced wholesale or field by field.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Light or dark appearance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light backgrounds with dark text.
    #[default]
    Light,
    /// Dark backgrounds with light text.
    Dark,
}

impl ThemeMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Colors used by geometry builders and guides.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// The mode these colors were designed for.
    pub mode: ThemeMode,
    /// Series palette for single-series charts, pie slices and scatter groups.
    pub series: Vec<Color>,
    /// Categorical palette for bubble categories and radar series.
    pub categorical: Vec<Color>,
    /// Gridlines, radar levels and spokes.
    pub grid: Color,
    /// Axis rules and tick labels.
    pub axis_text: Color,
    /// Primary text (titles, annotations).
    pub text: Color,
    /// Rising candles.
    pub bullish: Color,
    /// Falling candles.
    pub bearish: Color,
    /// Chart background.
    pub background: Color,
    /// Tooltip background.
    pub tooltip_background: Color,
    /// Tooltip border.
    pub tooltip_border: Color,
}

const CATEGORY10: [u32; 10] = [
    0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f, 0xbcbd22,
    0x17becf,
];

fn rgb(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::from_rgb8(r, g, b)
}

impl Theme {
    /// The default light palette.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            series: [0x3B82F6, 0x10B981, 0x8B5CF6, 0xF59E0B, 0xEF4444, 0xEC4899]
                .into_iter()
                .map(rgb)
                .collect(),
            categorical: CATEGORY10.into_iter().map(rgb).collect(),
            grid: rgb(0xE5E7EB),
            axis_text: rgb(0x4B5563),
            text: rgb(0x111827),
            bullish: rgb(0x059669),
            bearish: rgb(0xDC2626),
            background: rgb(0xFFFFFF),
            tooltip_background: rgb(0xFFFFFF),
            tooltip_border: rgb(0xE5E7EB),
        }
    }

    /// The default dark palette.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            series: [0x60A5FA, 0x34D399, 0xA78BFA, 0xFBBF24, 0xF87171, 0xF472B6]
                .into_iter()
                .map(rgb)
                .collect(),
            categorical: CATEGORY10.into_iter().map(rgb).collect(),
            grid: rgb(0x4B5563),
            axis_text: rgb(0xD1D5DB),
            text: rgb(0xF9FAFB),
            bullish: rgb(0x10B981),
            bearish: rgb(0xEF4444),
            background: rgb(0x1F2937),
            tooltip_background: rgb(0x1F2937),
            tooltip_border: rgb(0x4B5563),
        }
    }

    /// Returns the default palette for `mode`.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Returns the first series color.
    pub fn primary(&self) -> Color {
        self.series.first().copied().unwrap_or(self.axis_text)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Returns `color` with its RGB channels scaled by 0.7, keeping alpha.
pub fn darker(color: Color) -> Color {
    let [r, g, b, a] = color.components;
    Color::new([r * 0.7, g * 0.7, b * 0.7, a])
}

/// Parses `#RGB` or `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let v = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        6 => Some(rgb(v)),
        3 => {
            let expand = |n: u32| {
                #[allow(clippy::cast_possible_truncation, reason = "n is a single hex digit")]
                let n = (n & 0xF) as u8;
                n * 17
            };
            Some(Color::from_rgb8(expand(v >> 8), expand(v >> 4), expand(v)))
        }
        _ => None,
    }
}
