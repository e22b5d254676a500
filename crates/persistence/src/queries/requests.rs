// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holiday request queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::{
    DayHalf, DepartmentId, FinancialYearId, HolidayRequest, RequestId, RequestStatus, UserId,
};
use tracing::debug;

use crate::data_models::ReviewQueueEntry;
use crate::diesel_schema::{departments, holiday_requests, users};
use crate::encoding::{decode_date, decode_day_count, decode_enum, decode_timestamp};
use crate::error::PersistenceError;

/// Diesel Queryable struct for holiday request rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = holiday_requests)]
pub(crate) struct RequestRow {
    request_id: i64,
    user_id: i64,
    financial_year_id: i64,
    start_date: String,
    start_half: String,
    end_date: String,
    end_half: String,
    days_half_days: i32,
    status: String,
    created_at: String,
    reviewed_by: Option<i64>,
    reviewed_at: Option<String>,
}

impl RequestRow {
    pub(crate) fn into_domain(self) -> Result<HolidayRequest, PersistenceError> {
        Ok(HolidayRequest {
            id: RequestId::new(self.request_id),
            user_id: UserId::new(self.user_id),
            financial_year_id: FinancialYearId::new(self.financial_year_id),
            start_date: decode_date(&self.start_date)?,
            start_half: decode_enum::<DayHalf>(&self.start_half)?,
            end_date: decode_date(&self.end_date)?,
            end_half: decode_enum::<DayHalf>(&self.end_half)?,
            days_count: decode_day_count(self.days_half_days),
            status: decode_enum::<RequestStatus>(&self.status)?,
            created_at: decode_timestamp(&self.created_at)?,
            reviewed_by: self.reviewed_by.map(UserId::new),
            reviewed_at: self
                .reviewed_at
                .as_deref()
                .map(decode_timestamp)
                .transpose()?,
        })
    }
}

/// Filters for the review queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewQueueFilter {
    /// Only requests in this status. `None` means every status.
    pub status: Option<RequestStatus>,
    /// Only requests charged to this financial year.
    pub financial_year_id: Option<FinancialYearId>,
    /// Only requests from users in this department.
    pub department_id: Option<DepartmentId>,
}

/// Retrieves a request by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the request is not found.
pub fn get_request(
    conn: &mut SqliteConnection,
    request_id: RequestId,
) -> Result<Option<HolidayRequest>, PersistenceError> {
    debug!(request_id = %request_id, "Looking up request");

    holiday_requests::table
        .filter(holiday_requests::request_id.eq(request_id.value()))
        .select(RequestRow::as_select())
        .first(conn)
        .optional()?
        .map(RequestRow::into_domain)
        .transpose()
}

/// Lists a user's requests, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_requests_for_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
    financial_year_id: Option<FinancialYearId>,
) -> Result<Vec<HolidayRequest>, PersistenceError> {
    let mut query = holiday_requests::table
        .filter(holiday_requests::user_id.eq(user_id.value()))
        .select(RequestRow::as_select())
        .into_boxed();
    if let Some(financial_year_id) = financial_year_id {
        query = query.filter(holiday_requests::financial_year_id.eq(financial_year_id.value()));
    }

    query
        .order((
            holiday_requests::created_at.desc(),
            holiday_requests::request_id.desc(),
        ))
        .load::<RequestRow>(conn)?
        .into_iter()
        .map(RequestRow::into_domain)
        .collect()
}

/// Lists the approved requests of a user in a financial year.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_approved_requests(
    conn: &mut SqliteConnection,
    user_id: UserId,
    financial_year_id: FinancialYearId,
) -> Result<Vec<HolidayRequest>, PersistenceError> {
    holiday_requests::table
        .filter(holiday_requests::user_id.eq(user_id.value()))
        .filter(holiday_requests::financial_year_id.eq(financial_year_id.value()))
        .filter(holiday_requests::status.eq(RequestStatus::Approved.as_str()))
        .select(RequestRow::as_select())
        .order(holiday_requests::start_date.asc())
        .load::<RequestRow>(conn)?
        .into_iter()
        .map(RequestRow::into_domain)
        .collect()
}

/// Lists requests for review with the requester's name and department.
///
/// Ordered newest first. Requests whose requester's department no longer
/// exists are still listed, with no department name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_review_queue(
    conn: &mut SqliteConnection,
    filter: ReviewQueueFilter,
) -> Result<Vec<ReviewQueueEntry>, PersistenceError> {
    let mut query = holiday_requests::table
        .inner_join(users::table)
        .left_join(
            departments::table.on(departments::department_id.eq(users::department_id)),
        )
        .select((
            RequestRow::as_select(),
            users::name,
            users::department_id,
            departments::name.nullable(),
        ))
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(holiday_requests::status.eq(status.as_str()));
    }
    if let Some(financial_year_id) = filter.financial_year_id {
        query = query.filter(holiday_requests::financial_year_id.eq(financial_year_id.value()));
    }
    if let Some(department_id) = filter.department_id {
        query = query.filter(users::department_id.eq(department_id.value()));
    }

    let rows: Vec<(RequestRow, String, i64, Option<String>)> = query
        .order((
            holiday_requests::created_at.desc(),
            holiday_requests::request_id.desc(),
        ))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded review queue");

    rows.into_iter()
        .map(|(row, requester_name, department_id, department_name)| {
            Ok(ReviewQueueEntry {
                request: row.into_domain()?,
                requester_name,
                department_id: DepartmentId::new(department_id),
                department_name,
            })
        })
        .collect()
}
