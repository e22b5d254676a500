// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Working-day calculation.
//!
//! Converts a date range with half-day flags into the number of chargeable
//! leave days. This is a pure, total function: it never fails, and an
//! inverted range must be rejected by the caller before calling it.

use crate::calendar::HolidaySet;
use crate::day_count::{DayCount, DayHalf};
use time::{Date, Weekday};

/// Returns true if `day` is neither a weekend day nor a public holiday.
///
/// Only Saturday and Sunday are weekend days.
#[must_use]
pub fn is_working_day(day: Date, public_holidays: &HolidaySet) -> bool {
    !matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday)
        && !public_holidays.contains(&day)
}

/// Computes the chargeable leave days for a request.
///
/// Rules:
/// - A single-day request is 1 day when both halves are `full`, otherwise
///   half a day, whichever half is flagged.
/// - A multi-day request counts every working day in `[start, end]`, then
///   takes half a day off the first day if `start_half` is partial and
///   half a day off the last day if `end_half` is partial. A partial flag
///   on a weekend or public holiday has no effect.
///
/// The result can be zero, e.g. for a range covering only a weekend.
///
/// # Arguments
///
/// * `start` - First calendar day (inclusive)
/// * `end` - Last calendar day (inclusive)
/// * `public_holidays` - Holidays for every year the range touches
/// * `start_half` - Part of the first day taken
/// * `end_half` - Part of the last day taken
#[must_use]
pub fn compute_days(
    start: Date,
    end: Date,
    public_holidays: &HolidaySet,
    start_half: DayHalf,
    end_half: DayHalf,
) -> DayCount {
    if start == end {
        return if start_half.is_partial() || end_half.is_partial() {
            DayCount::HALF
        } else {
            DayCount::ONE
        };
    }

    let working_days: i32 = std::iter::successors(Some(start), |day| day.next_day())
        .take_while(|day| *day <= end)
        .filter(|day| is_working_day(*day, public_holidays))
        .fold(0_i32, |acc, _| acc.saturating_add(1));

    let mut half_days: i32 = working_days.saturating_mul(2);

    if start_half.is_partial() && is_working_day(start, public_holidays) {
        half_days -= 1;
    }

    if end_half.is_partial() && is_working_day(end, public_holidays) {
        half_days -= 1;
    }

    DayCount::from_half_days(half_days)
}
