// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record-oriented data for ChartMaster charts.
//!
//! This crate provides:
//! - [`Value`] and [`Record`]: schema-less rows addressed by caller-supplied field names,
//! - [`Dataset`]: an owned list of records with stable row keys (used as identity for hover,
//!   tooltips and legends),
//! - a tiny [`Transform`] IR (filter/sort/project) with a full-recompute executor,
//! - [`SortState`] for data-table column sorting, and
//! - [`Summary`] statistics over a numeric field.
//!
//! Everything here is plain data and pure functions; nothing retains state between calls.

#![no_std]

extern crate alloc;

mod date;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod record;
mod stats;
mod table;
mod transform;

pub use date::{days_from_civil, format_iso_date, format_long_date, format_month_day};
pub use error::DataError;
pub use record::{Record, Value};
pub use stats::Summary;
pub use table::{Dataset, SortState};
pub use transform::{CompareOp, Predicate, SortOrder, Transform};
