// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar helpers for date values.
//!
//! Dates are stored as UTC milliseconds since the Unix epoch. Conversion uses the
//! proleptic Gregorian calendar, so it works for any `i64` day count without a time zone
//! database.

extern crate alloc;

use alloc::string::String;

const MS_PER_DAY: i64 = 86_400_000;

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the number of days since 1970-01-01 for a civil date.
///
/// `month` is `1..=12` and `day` is `1..=31`.
pub fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Returns `(year, month, day)` for a day count since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, usize, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "month is in 1..=12 and day in 1..=31 by construction"
    )]
    {
        (year, month as usize, day as u32)
    }
}

fn civil_from_ms(ms: i64) -> (i64, usize, u32) {
    civil_from_days(ms.div_euclid(MS_PER_DAY))
}

/// Formats a timestamp as `YYYY-MM-DD`.
pub fn format_iso_date(ms: i64) -> String {
    let (y, m, d) = civil_from_ms(ms);
    alloc::format!("{y:04}-{m:02}-{d:02}")
}

/// Formats a timestamp as an abbreviated month and zero-padded day, e.g. `Jan 05`.
pub fn format_month_day(ms: i64) -> String {
    let (_y, m, d) = civil_from_ms(ms);
    alloc::format!("{} {d:02}", MONTHS_SHORT[m - 1])
}

/// Formats a timestamp as a full date, e.g. `January 05, 2024`.
pub fn format_long_date(ms: i64) -> String {
    let (y, m, d) = civil_from_ms(ms);
    alloc::format!("{} {d:02}, {y}", MONTHS_LONG[m - 1])
}
