// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Public holiday calendars.
//!
//! Holidays are looked up per calendar year. A request that spans a year
//! boundary needs the holidays of every year it touches, which
//! [`holidays_for_range`] collects into a single [`HolidaySet`].

use std::collections::BTreeSet;
use time::Date;
use time::macros::date;

/// A set of public holiday dates, matched by calendar day.
pub type HolidaySet = BTreeSet<Date>;

/// Source of public holidays, one calendar year at a time.
pub trait HolidayCalendar {
    /// Returns the public holidays falling in `year`.
    ///
    /// Years the calendar knows nothing about have no holidays.
    fn holidays_in_year(&self, year: i32) -> Vec<Date>;
}

/// England and Wales bank holidays, 2024 to 2026.
const ENGLAND_AND_WALES: [Date; 24] = [
    date!(2024 - 01 - 01),
    date!(2024 - 03 - 29),
    date!(2024 - 04 - 01),
    date!(2024 - 05 - 06),
    date!(2024 - 05 - 27),
    date!(2024 - 08 - 26),
    date!(2024 - 12 - 25),
    date!(2024 - 12 - 26),
    date!(2025 - 01 - 01),
    date!(2025 - 04 - 18),
    date!(2025 - 04 - 21),
    date!(2025 - 05 - 05),
    date!(2025 - 05 - 26),
    date!(2025 - 08 - 25),
    date!(2025 - 12 - 25),
    date!(2025 - 12 - 26),
    date!(2026 - 01 - 01),
    date!(2026 - 04 - 03),
    date!(2026 - 04 - 06),
    date!(2026 - 05 - 04),
    date!(2026 - 05 - 25),
    date!(2026 - 08 - 31),
    date!(2026 - 12 - 25),
    date!(2026 - 12 - 28),
];

/// A calendar backed by a fixed list of dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticHolidayCalendar {
    holidays: HolidaySet,
}

impl StaticHolidayCalendar {
    /// Creates a calendar with the England and Wales bank holidays.
    #[must_use]
    pub fn england_and_wales() -> Self {
        Self::from_dates(ENGLAND_AND_WALES)
    }

    /// Creates a calendar from an explicit list of dates.
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = Date>,
    {
        Self {
            holidays: dates.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn holidays_in_year(&self, year: i32) -> Vec<Date> {
        self.holidays
            .iter()
            .filter(|holiday| holiday.year() == year)
            .copied()
            .collect()
    }
}

/// Collects the public holidays of every calendar year in `[start, end]`.
///
/// The calendar is probed once per year spanned.
pub fn holidays_for_range<C>(calendar: &C, start: Date, end: Date) -> HolidaySet
where
    C: HolidayCalendar + ?Sized,
{
    (start.year()..=end.year())
        .flat_map(|year| calendar.holidays_in_year(year))
        .collect()
}
