// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::repository::{AllowanceRepository, FinancialYearRepository, RequestRepository};
use finyearly_domain::{
    AllowanceSummary, DayCount, FinancialYear, FinancialYearId, HolidayRequest, UserId,
    calculate_allowance, resolve_total_allowance, select_financial_year,
};
use tracing::debug;

/// Returns the leave balance of a user in a financial year.
///
/// The total is the explicit allowance record when one exists, otherwise
/// the stored default allowance. The amount taken is re-summed from the
/// approved requests on every call; nothing is cached.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_allowance<S>(
    store: &mut S,
    user_id: UserId,
    financial_year_id: FinancialYearId,
) -> Result<AllowanceSummary, CoreError>
where
    S: AllowanceRepository + RequestRepository + ?Sized,
{
    let explicit: Option<DayCount> = store.get_allowance_record(user_id, financial_year_id)?;
    let default_allowance: DayCount = store.get_default_allowance()?;
    let total_allowance: DayCount = resolve_total_allowance(explicit, default_allowance);

    let approved: Vec<HolidayRequest> =
        store.list_approved_requests(user_id, financial_year_id)?;

    let summary: AllowanceSummary =
        calculate_allowance(user_id, financial_year_id, total_allowance, &approved);

    debug!(
        user_id = %user_id,
        financial_year_id = %financial_year_id,
        total = %summary.total_allowance,
        taken = %summary.holidays_taken,
        remaining = %summary.remaining_days,
        "Computed allowance"
    );

    Ok(summary)
}

/// Resolves the financial year a caller is working in.
///
/// The year matching `requested` is returned if it exists, otherwise the
/// latest year by start. Returns `None` only when no years are defined.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn current_financial_year<S>(
    store: &mut S,
    requested: Option<FinancialYearId>,
) -> Result<Option<FinancialYear>, CoreError>
where
    S: FinancialYearRepository + ?Sized,
{
    let years: Vec<FinancialYear> = store.list_financial_years()?;
    Ok(select_financial_year(&years, requested).cloned())
}
