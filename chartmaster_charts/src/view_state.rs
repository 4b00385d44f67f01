// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serializable interaction state.
//!
//! A [`ViewState`] holds the zoom factor, pan offset, hovered row and hidden legend items
//! for one chart. It changes only through [`ViewState::apply`], which returns a new state;
//! replaying the same [`ViewEvent`]s from the default state always reproduces the same view.

extern crate alloc;

use alloc::collections::BTreeSet;

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::InteractionConfig;

/// Factor applied by one zoom step.
pub const ZOOM_STEP: f64 = 1.2;
/// Smallest zoom factor.
pub const MIN_SCALE: f64 = 0.5;
/// Largest zoom factor.
pub const MAX_SCALE: f64 = 3.0;

/// A 2D offset in plot units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

impl Offset {
    /// Creates an offset.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the offset as a vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One user interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewEvent {
    /// Multiply the zoom factor by [`ZOOM_STEP`].
    ZoomIn,
    /// Divide the zoom factor by [`ZOOM_STEP`].
    ZoomOut,
    /// Restore zoom 1 and zero pan.
    Reset,
    /// Add to the pan offset.
    Pan {
        /// Horizontal delta.
        dx: f64,
        /// Vertical delta.
        dy: f64,
    },
    /// Set or clear the hovered row.
    Hover(Option<u64>),
    /// Show or hide the legend item with this id.
    ToggleSeries(u64),
}

/// Zoom, pan, hover and visibility for one chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    /// Zoom factor in `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f64,
    /// Pan offset, applied before scaling.
    pub pan: Offset,
    /// Row key under the pointer.
    pub hovered_id: Option<u64>,
    /// Legend item ids currently hidden.
    pub hidden: BTreeSet<u64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Offset::default(),
            hovered_id: None,
            hidden: BTreeSet::new(),
        }
    }
}

impl ViewState {
    /// Returns the state after `event`.
    ///
    /// Zoom events are ignored when `interaction.zoom_enabled` is false, and pan events when
    /// `interaction.pan_enabled` is false. Reset always applies.
    #[must_use]
    pub fn apply(&self, event: &ViewEvent, interaction: &InteractionConfig) -> Self {
        let mut next = self.clone();
        match *event {
            ViewEvent::ZoomIn if interaction.zoom_enabled => {
                next.scale = (self.scale * ZOOM_STEP).min(MAX_SCALE);
            }
            ViewEvent::ZoomOut if interaction.zoom_enabled => {
                next.scale = (self.scale / ZOOM_STEP).max(MIN_SCALE);
            }
            ViewEvent::Reset => {
                next.scale = 1.0;
                next.pan = Offset::default();
            }
            ViewEvent::Pan { dx, dy } if interaction.pan_enabled => {
                next.pan = Offset::new(self.pan.x + dx, self.pan.y + dy);
            }
            ViewEvent::Hover(id) => next.hovered_id = id,
            ViewEvent::ToggleSeries(id) => {
                if !next.hidden.remove(&id) {
                    next.hidden.insert(id);
                }
            }
            _ => {
                tracing::trace!(?event, "interaction disabled, ignoring event");
                return next;
            }
        }
        tracing::debug!(
            ?event,
            scale = next.scale,
            hidden = next.hidden.len(),
            "applied view event"
        );
        next
    }

    /// Folds `events` over `self`.
    #[must_use]
    pub fn replay<'a>(
        &self,
        events: impl IntoIterator<Item = &'a ViewEvent>,
        interaction: &InteractionConfig,
    ) -> Self {
        events
            .into_iter()
            .fold(self.clone(), |state, event| state.apply(event, interaction))
    }

    /// Returns whether the legend item `id` is hidden.
    pub fn is_hidden(&self, id: u64) -> bool {
        self.hidden.contains(&id)
    }

    /// Returns the view transform about `origin` (usually the plot center): the pan is
    /// applied first, then the zoom.
    pub fn transform(&self, origin: Point) -> Affine {
        let o = origin.to_vec2();
        Affine::translate(o)
            * Affine::scale(self.scale)
            * Affine::translate(self.pan.to_vec2())
            * Affine::translate(-o)
    }
}
