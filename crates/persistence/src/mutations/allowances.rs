// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allowance and settings mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::{DEFAULT_ALLOWANCE, DayCount, FinancialYearId, UserId};
use tracing::{debug, info};

use crate::diesel_schema::{allowances, settings};
use crate::error::PersistenceError;
use crate::queries::allowances::SETTINGS_ROW_ID;

/// Sets the allowance of a user in a financial year, replacing any
/// existing value.
///
/// # Errors
///
/// Returns an error if the user or financial year does not exist, or the
/// write fails.
pub fn set_allowance(
    conn: &mut SqliteConnection,
    user_id: UserId,
    financial_year_id: FinancialYearId,
    total: DayCount,
) -> Result<(), PersistenceError> {
    info!(
        user_id = %user_id,
        financial_year_id = %financial_year_id,
        total = %total,
        "Setting allowance"
    );

    diesel::insert_into(allowances::table)
        .values((
            allowances::user_id.eq(user_id.value()),
            allowances::financial_year_id.eq(financial_year_id.value()),
            allowances::total_half_days.eq(total.half_days()),
        ))
        .on_conflict((allowances::user_id, allowances::financial_year_id))
        .do_update()
        .set(allowances::total_half_days.eq(total.half_days()))
        .execute(conn)?;

    Ok(())
}

/// Sets the organisation-wide default allowance.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_default_allowance(
    conn: &mut SqliteConnection,
    total: DayCount,
) -> Result<(), PersistenceError> {
    info!(total = %total, "Setting default allowance");

    diesel::insert_into(settings::table)
        .values((
            settings::setting_id.eq(SETTINGS_ROW_ID),
            settings::default_allowance_half_days.eq(total.half_days()),
        ))
        .on_conflict(settings::setting_id)
        .do_update()
        .set(settings::default_allowance_half_days.eq(total.half_days()))
        .execute(conn)?;

    Ok(())
}

/// Creates the settings row with the built-in default allowance if it
/// does not exist yet. An existing row is left untouched.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn ensure_default_allowance(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let inserted: usize = diesel::insert_into(settings::table)
        .values((
            settings::setting_id.eq(SETTINGS_ROW_ID),
            settings::default_allowance_half_days.eq(DEFAULT_ALLOWANCE.half_days()),
        ))
        .on_conflict(settings::setting_id)
        .do_nothing()
        .execute(conn)?;

    if inserted > 0 {
        debug!(total = %DEFAULT_ALLOWANCE, "Created settings row");
    }

    Ok(())
}
