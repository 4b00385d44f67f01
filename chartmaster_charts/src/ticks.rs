// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nice tick generation.
//!
//! Ticks are multiples of 1, 2, 5 or 10 times a power of ten. Values are computed from an
//! integer index so they do not accumulate floating-point error, and the sequence is
//! produced lazily.

extern crate alloc;

use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Default approximate tick count.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Returns a nice step for roughly `count` intervals over `[min, max]`.
///
/// Returns `0.0` for a degenerate or non-finite domain, or when `count` is zero.
pub fn tick_step(min: f64, max: f64, count: usize) -> f64 {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss, reason = "tick counts are small")]
    let raw = (max - min).abs() / count as f64;
    nice_step(raw)
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let (factor, power) = step_parts(step);
    factor * 10_f64.powi(power)
}

/// Splits a raw step into a nice factor (1, 2, 5 or 10) and a power of ten.
fn step_parts(step: f64) -> (f64, i32) {
    let power = step.log10().floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "log10 of a finite f64 is within the i32 range"
    )]
    let power = power as i32;
    let error = step / 10_f64.powi(power);
    let factor = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    (factor, power)
}

/// A lazy, finite sequence of nice tick values.
///
/// The first tick is at or below the domain minimum and the last at or above the maximum.
/// A degenerate domain yields exactly one tick, and a count of zero yields none. Domains
/// too wide or too narrow for a representable nice step yield just their two endpoints.
#[derive(Clone, Debug)]
pub struct Ticks {
    state: TickState,
}

#[derive(Clone, Debug)]
enum TickState {
    /// Up to two explicit values.
    Fixed { values: [f64; 2], next: usize, len: usize },
    Sweep {
        next: i64,
        last: i64,
        /// Multiply the index by this value to get the tick.
        inc: f64,
        /// Divide instead of multiply (used for fractional steps to keep values exact).
        inverted: bool,
    },
}

impl Ticks {
    /// Creates ticks for `[min, max]` with approximately `count` intervals.
    ///
    /// The domain may be given in either order.
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        if count == 0 || !min.is_finite() || !max.is_finite() {
            return Self::empty();
        }
        if min == max {
            return Self::fixed([min, min], 1);
        }

        #[allow(clippy::cast_precision_loss, reason = "tick counts are small")]
        let raw = (max - min) / count as f64;
        if !raw.is_finite() || raw <= 0.0 {
            return Self::fixed([min, max], 2);
        }
        let (factor, power) = step_parts(raw);
        let (inc, inverted) = if power < 0 {
            (10_f64.powi(-power) / factor, true)
        } else {
            (10_f64.powi(power) * factor, false)
        };
        if !inc.is_finite() || inc == 0.0 {
            return Self::fixed([min, max], 2);
        }
        let to_index = |v: f64| if inverted { v * inc } else { v / inc };
        let to_value = |i: f64| if inverted { i / inc } else { i * inc };

        let mut first = to_index(min).round();
        if to_value(first) > min {
            first -= 1.0;
        }
        let mut last = to_index(max).round();
        if to_value(last) < max {
            last += 1.0;
        }
        if !(to_value(first).is_finite() && to_value(last).is_finite())
            || last - first > 10_000.0
        {
            return Self::fixed([min, max], 2);
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "indices are finite and bounded by the check above"
        )]
        let (next, last) = (first as i64, last as i64);
        Self {
            state: TickState::Sweep {
                next,
                last,
                inc,
                inverted,
            },
        }
    }

    /// An empty tick sequence.
    pub fn empty() -> Self {
        Self::fixed([0.0; 2], 0)
    }

    fn fixed(values: [f64; 2], len: usize) -> Self {
        Self {
            state: TickState::Fixed {
                values,
                next: 0,
                len,
            },
        }
    }

    /// Returns the distance between consecutive ticks, or `0.0` for fewer than two ticks.
    pub fn step(&self) -> f64 {
        match self.state {
            TickState::Fixed { values, len, .. } => {
                if len == 2 {
                    values[1] - values[0]
                } else {
                    0.0
                }
            }
            TickState::Sweep { inc, inverted, .. } => {
                if inverted {
                    1.0 / inc
                } else {
                    inc
                }
            }
        }
    }
}

impl Iterator for Ticks {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match &mut self.state {
            TickState::Fixed { values, next, len } => {
                let v = values.get(*next).copied().filter(|_| *next < *len)?;
                *next += 1;
                Some(v)
            }
            TickState::Sweep {
                next,
                last,
                inc,
                inverted,
            } => {
                if *next > *last {
                    return None;
                }
                #[allow(clippy::cast_precision_loss, reason = "tick indices are small")]
                let i = *next as f64;
                *next += 1;
                let v = if *inverted { i / *inc } else { i * *inc };
                // Avoid printing "-0".
                Some(if v == 0.0 { 0.0 } else { v })
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match &self.state {
            TickState::Fixed { next, len, .. } => len.saturating_sub(*next),
            TickState::Sweep { next, last, .. } => {
                usize::try_from(last - next + 1).unwrap_or(0)
            }
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Ticks {}

impl core::iter::FusedIterator for Ticks {}

/// Formats a tick label with as many decimals as `step` needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() && step < 1.0 {
        let d = (-step.log10() - 1e-9).ceil().max(0.0);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to a small non-negative range"
        )]
        {
            d.min(12.0) as usize
        }
    } else {
        0
    };
    if value == 0.0 {
        return "0".to_string();
    }
    alloc::format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn ticks_cover_the_domain_with_round_values() {
        let ticks: Vec<f64> = Ticks::new(0.0, 35.0, 5).collect();
        assert_eq!(ticks, [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]);

        let ticks: Vec<f64> = Ticks::new(3.0, 97.0, 5).collect();
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(100.0));
    }

    #[test]
    fn fractional_steps_are_exact() {
        let ticks: Vec<f64> = Ticks::new(0.0, 1.0, 5).collect();
        assert_eq!(ticks, [0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        let ticks: Vec<f64> = Ticks::new(0.1, 0.3, 2).collect();
        assert_eq!(ticks, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn size_hint_is_exact() {
        let mut ticks = Ticks::new(-10.0, 10.0, 4);
        assert_eq!(ticks.len(), 5);
        ticks.next();
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks.step(), 5.0);
    }

    #[test]
    fn reversed_domains_are_sorted() {
        let a: Vec<f64> = Ticks::new(35.0, 0.0, 5).collect();
        let b: Vec<f64> = Ticks::new(0.0, 35.0, 5).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_and_zero_count() {
        let ticks: Vec<f64> = Ticks::new(4.0, 4.0, 5).collect();
        assert_eq!(ticks, [4.0]);
        assert_eq!(Ticks::new(0.0, 10.0, 0).count(), 0);
        assert_eq!(Ticks::new(f64::NAN, 10.0, 5).count(), 0);
    }

    #[test]
    fn extreme_spans_fall_back_to_endpoints() {
        let ticks: Vec<f64> = Ticks::new(-1e308, 1e308, 5).collect();
        assert_eq!(ticks, [-1e308, 1e308]);
        let ticks: Vec<f64> = Ticks::new(-f64::MAX, f64::MAX, 5).collect();
        assert_eq!(ticks, [-f64::MAX, f64::MAX]);
        let ticks = Ticks::new(0.0, 1e-320, 5);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks.collect::<Vec<_>>(), [0.0, 1e-320]);
    }

    #[test]
    fn ticks_near_f64_max_stay_finite() {
        let ticks: Vec<f64> = Ticks::new(-1.79e308, -1e308, 5).collect();
        assert!(ticks.len() >= 2);
        assert!(ticks.iter().all(|t| t.is_finite()), "{ticks:?}");
        assert!(ticks[0] <= -1.79e308 && *ticks.last().unwrap() >= -1e308);
    }

    #[test]
    fn ticks_are_deterministic() {
        let a: Vec<f64> = Ticks::new(-3.7, 123.4, 7).collect();
        let b: Vec<f64> = Ticks::new(-3.7, 123.4, 7).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn tick_step_uses_one_two_five() {
        assert_eq!(tick_step(0.0, 100.0, 10), 10.0);
        assert_eq!(tick_step(0.0, 100.0, 5), 20.0);
        assert_eq!(tick_step(0.0, 100.0, 2), 50.0);
        assert_eq!(tick_step(1.0, 1.0, 5), 0.0);
    }

    #[test]
    fn format_tick_uses_step_decimals() {
        assert_eq!(format_tick(5.0, 5.0), "5");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
        assert_eq!(format_tick(-0.0, 1.0), "0");
    }
}
