// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allowance and settings queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::{DayCount, FinancialYearId, UserId};
use tracing::debug;

use crate::diesel_schema::{allowances, settings};
use crate::encoding::decode_day_count;
use crate::error::PersistenceError;

/// The id of the single settings row.
pub const SETTINGS_ROW_ID: i64 = 1;

/// Retrieves the explicit allowance of a user in a financial year.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no allowance has been set.
pub fn get_allowance_record(
    conn: &mut SqliteConnection,
    user_id: UserId,
    financial_year_id: FinancialYearId,
) -> Result<Option<DayCount>, PersistenceError> {
    debug!(user_id = %user_id, financial_year_id = %financial_year_id, "Looking up allowance");

    Ok(allowances::table
        .filter(allowances::user_id.eq(user_id.value()))
        .filter(allowances::financial_year_id.eq(financial_year_id.value()))
        .select(allowances::total_half_days)
        .first::<i32>(conn)
        .optional()?
        .map(decode_day_count))
}

/// Retrieves the organisation-wide default allowance.
///
/// # Errors
///
/// Returns an error if the database query fails or the settings row is
/// missing.
pub fn get_default_allowance(conn: &mut SqliteConnection) -> Result<DayCount, PersistenceError> {
    let half_days: i32 = settings::table
        .filter(settings::setting_id.eq(SETTINGS_ROW_ID))
        .select(settings::default_allowance_half_days)
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(String::from("Settings row is missing")))?;
    Ok(decode_day_count(half_days))
}
