// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allowance aggregation.
//!
//! Read-only aggregation of a configured allowance and approved requests
//! into a remaining balance. The balance is always derived from the
//! request records; no running total is stored anywhere.

use crate::day_count::DayCount;
use crate::request_status::HolidayRequest;
use crate::types::{FinancialYearId, UserId};
use serde::{Deserialize, Serialize};

/// Default allowance written to the settings row of a new database.
pub const DEFAULT_ALLOWANCE: DayCount = DayCount::from_whole_days(25);

/// Leave balance for one user in one financial year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceSummary {
    /// Total permitted days for the year.
    pub total_allowance: DayCount,
    /// Days consumed by approved requests.
    pub holidays_taken: DayCount,
    /// `total_allowance - holidays_taken`. Negative when overdrawn.
    pub remaining_days: DayCount,
    /// Whether the allowance has been used exactly.
    pub is_exhausted: bool,
    /// Whether approvals exceed the allowance.
    pub is_overdrawn: bool,
}

/// Picks the explicit allowance if one is configured, else the default.
#[must_use]
pub fn resolve_total_allowance(
    explicit: Option<DayCount>,
    default_allowance: DayCount,
) -> DayCount {
    explicit.unwrap_or(default_allowance)
}

/// Calculates the leave balance for a user in a financial year.
///
/// Only requests belonging to `user_id` and `financial_year_id` with
/// status `approved` are counted. Pending and denied requests never
/// affect the balance.
///
/// The remaining balance is not clamped; an admin lowering an allowance
/// after approvals can leave it negative.
pub fn calculate_allowance<'a, I>(
    user_id: UserId,
    financial_year_id: FinancialYearId,
    total_allowance: DayCount,
    requests: I,
) -> AllowanceSummary
where
    I: IntoIterator<Item = &'a HolidayRequest>,
{
    let holidays_taken: DayCount = requests
        .into_iter()
        .filter(|request| {
            request.user_id == user_id
                && request.financial_year_id == financial_year_id
                && request.is_approved()
        })
        .map(|request| request.days_count)
        .sum();

    let remaining_days: DayCount = total_allowance - holidays_taken;

    AllowanceSummary {
        total_allowance,
        holidays_taken,
        remaining_days,
        is_exhausted: remaining_days.is_zero(),
        is_overdrawn: remaining_days.is_negative(),
    }
}
