// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holiday request lifecycle.
//!
//! Creation validates the range, prices it in working days and checks it
//! against the remaining allowance before anything is written. Review and
//! cancellation re-read the request and only act on `pending` requests.

use crate::allowance::get_allowance;
use crate::error::CoreError;
use crate::repository::LeaveStore;
use finyearly_domain::{
    AllowanceSummary, DayCount, DayHalf, FinancialYear, FinancialYearId, HolidayCalendar,
    HolidayRequest, HolidaySet, NewHolidayRequest, RequestId, RequestStatus, User, UserId,
    compute_days, holidays_for_range,
};
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

/// A holiday request as submitted, before it is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDraft {
    /// The requesting user.
    pub user_id: UserId,
    /// The financial year to charge.
    pub financial_year_id: FinancialYearId,
    /// First calendar day.
    pub start_date: Date,
    /// Part of the first day taken.
    pub start_half: DayHalf,
    /// Last calendar day.
    pub end_date: Date,
    /// Part of the last day taken.
    pub end_half: DayHalf,
}

/// Prices a date range in working days.
///
/// Public holidays are collected for every calendar year the range
/// touches before counting.
///
/// # Errors
///
/// Returns `InvalidRange` if `end` is before `start`.
pub fn calculate_request_days<C>(
    calendar: &C,
    start: Date,
    end: Date,
    start_half: DayHalf,
    end_half: DayHalf,
) -> Result<DayCount, CoreError>
where
    C: HolidayCalendar + ?Sized,
{
    if end < start {
        return Err(CoreError::InvalidRange { start, end });
    }

    let holidays: HolidaySet = holidays_for_range(calendar, start, end);
    Ok(compute_days(start, end, &holidays, start_half, end_half))
}

/// Validates and persists a new holiday request.
///
/// # Arguments
///
/// * `store` - The request store
/// * `calendar` - Public holiday source
/// * `draft` - The submitted request
/// * `now` - Submission time, recorded as `created_at`
///
/// # Returns
///
/// * `Ok(HolidayRequest)` with status `pending`
/// * `Err(CoreError)` if the request is rejected; nothing is persisted
///
/// # Errors
///
/// Returns an error if:
/// - The end date precedes the start date
/// - The user does not exist or is archived
/// - The financial year does not exist
/// - Either date falls outside the financial year
/// - The range contains no working time
/// - The request exceeds the remaining allowance
/// - The store fails
pub fn create_request<S, C>(
    store: &mut S,
    calendar: &C,
    draft: &RequestDraft,
    now: OffsetDateTime,
) -> Result<HolidayRequest, CoreError>
where
    S: LeaveStore + ?Sized,
    C: HolidayCalendar + ?Sized,
{
    if draft.end_date < draft.start_date {
        return Err(CoreError::InvalidRange {
            start: draft.start_date,
            end: draft.end_date,
        });
    }

    let user: User = store
        .get_user(draft.user_id)?
        .filter(User::is_active)
        .ok_or(CoreError::NotFound {
            resource: "User",
            id: draft.user_id.value(),
        })?;

    let financial_year: FinancialYear = store
        .get_financial_year(draft.financial_year_id)?
        .ok_or(CoreError::NotFound {
            resource: "Financial year",
            id: draft.financial_year_id.value(),
        })?;

    for date in [draft.start_date, draft.end_date] {
        if !financial_year.contains_date(date) {
            return Err(CoreError::OutsideFinancialYear {
                date,
                financial_year: financial_year.name.clone(),
            });
        }
    }

    let days_count: DayCount = calculate_request_days(
        calendar,
        draft.start_date,
        draft.end_date,
        draft.start_half,
        draft.end_half,
    )?;

    if !days_count.is_positive() {
        return Err(CoreError::NoWorkingDays {
            start: draft.start_date,
            end: draft.end_date,
        });
    }

    let balance: AllowanceSummary = get_allowance(store, user.id, financial_year.id)?;
    if days_count > balance.remaining_days {
        warn!(
            user_id = %user.id,
            requested = %days_count,
            remaining = %balance.remaining_days,
            "Rejected request exceeding allowance"
        );
        return Err(CoreError::AllowanceExceeded {
            requested: days_count,
            remaining: balance.remaining_days,
        });
    }

    let new_request: NewHolidayRequest = NewHolidayRequest {
        user_id: user.id,
        financial_year_id: financial_year.id,
        start_date: draft.start_date,
        start_half: draft.start_half,
        end_date: draft.end_date,
        end_half: draft.end_half,
        days_count,
        created_at: now,
    };

    let stored: HolidayRequest = store.create_request(&new_request)?;

    info!(
        request_id = %stored.id,
        user_id = %stored.user_id,
        financial_year = %financial_year.name,
        days = %stored.days_count,
        "Created holiday request"
    );

    Ok(stored)
}

/// Records a review outcome on a pending request.
///
/// The request is re-read before writing, so a request reviewed by
/// someone else in the meantime is rejected. The allowance is not checked
/// again; an approval may overdraw it.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The request is not `pending`
/// - `decision` is not `approved` or `denied`
/// - The store fails
pub fn review_request<S>(
    store: &mut S,
    request_id: RequestId,
    decision: RequestStatus,
    reviewer: UserId,
    now: OffsetDateTime,
) -> Result<HolidayRequest, CoreError>
where
    S: LeaveStore + ?Sized,
{
    let request: HolidayRequest = load_request(store, request_id)?;
    request.status.validate_transition(decision)?;

    let updated: HolidayRequest =
        store.update_request_status(request_id, decision, reviewer, now)?;

    info!(
        request_id = %request_id,
        reviewer = %reviewer,
        status = %decision,
        "Reviewed holiday request"
    );

    Ok(updated)
}

/// Deletes a request that has not been reviewed yet.
///
/// Returns the deleted record.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The request has already been approved or denied
/// - The store fails
pub fn cancel_request<S>(store: &mut S, request_id: RequestId) -> Result<HolidayRequest, CoreError>
where
    S: LeaveStore + ?Sized,
{
    let request: HolidayRequest = load_request(store, request_id)?;
    request.status.validate_cancellation()?;

    store.delete_request(request_id)?;

    info!(request_id = %request_id, user_id = %request.user_id, "Cancelled holiday request");

    Ok(request)
}

fn load_request<S>(store: &mut S, request_id: RequestId) -> Result<HolidayRequest, CoreError>
where
    S: LeaveStore + ?Sized,
{
    let request: Option<HolidayRequest> = store.get_request(request_id)?;
    request.ok_or_else(|| {
        debug!(request_id = %request_id, "Request not found");
        CoreError::NotFound {
            resource: "Request",
            id: request_id.value(),
        }
    })
}
