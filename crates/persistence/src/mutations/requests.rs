// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holiday request mutations.
//!
//! Each function is a single statement. Status checks happen in the
//! lifecycle operations before these are called.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::{NewHolidayRequest, RequestId, RequestStatus, UserId};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::holiday_requests;
use crate::encoding::{encode_date, encode_timestamp};
use crate::error::PersistenceError;

/// Inserts a new `pending` request.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_request(
    conn: &mut SqliteConnection,
    request: &NewHolidayRequest,
) -> Result<RequestId, PersistenceError> {
    debug!(
        user_id = %request.user_id,
        start = %request.start_date,
        end = %request.end_date,
        "Inserting holiday request"
    );

    diesel::insert_into(holiday_requests::table)
        .values((
            holiday_requests::user_id.eq(request.user_id.value()),
            holiday_requests::financial_year_id.eq(request.financial_year_id.value()),
            holiday_requests::start_date.eq(encode_date(request.start_date)?),
            holiday_requests::start_half.eq(request.start_half.as_str()),
            holiday_requests::end_date.eq(encode_date(request.end_date)?),
            holiday_requests::end_half.eq(request.end_half.as_str()),
            holiday_requests::days_half_days.eq(request.days_count.half_days()),
            holiday_requests::status.eq(RequestStatus::Pending.as_str()),
            holiday_requests::created_at.eq(encode_timestamp(request.created_at)?),
        ))
        .execute(conn)?;

    Ok(RequestId::new(get_last_insert_rowid(conn)?))
}

/// Writes a review outcome.
///
/// # Errors
///
/// Returns an error if the request does not exist or the update fails.
pub fn update_request_status(
    conn: &mut SqliteConnection,
    request_id: RequestId,
    status: RequestStatus,
    reviewed_by: UserId,
    reviewed_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    info!(request_id = %request_id, status = %status, "Updating request status");

    let rows_affected: usize = diesel::update(holiday_requests::table)
        .filter(holiday_requests::request_id.eq(request_id.value()))
        .set((
            holiday_requests::status.eq(status.as_str()),
            holiday_requests::reviewed_by.eq(Some(reviewed_by.value())),
            holiday_requests::reviewed_at.eq(Some(encode_timestamp(reviewed_at)?)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Request {request_id}")));
    }
    Ok(())
}

/// Deletes a request.
///
/// # Errors
///
/// Returns an error if the request does not exist or the delete fails.
pub fn delete_request(
    conn: &mut SqliteConnection,
    request_id: RequestId,
) -> Result<(), PersistenceError> {
    info!(request_id = %request_id, "Deleting request");

    let rows_affected: usize = diesel::delete(holiday_requests::table)
        .filter(holiday_requests::request_id.eq(request_id.value()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("Request {request_id}")));
    }
    Ok(())
}
