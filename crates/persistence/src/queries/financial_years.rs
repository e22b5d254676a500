// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::{FinancialYear, FinancialYearId};

use crate::diesel_schema::financial_years;
use crate::encoding::decode_timestamp;
use crate::error::PersistenceError;

/// Diesel Queryable struct for financial year rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = financial_years)]
struct FinancialYearRow {
    financial_year_id: i64,
    name: String,
    start_at: String,
    end_at: String,
}

impl FinancialYearRow {
    fn into_domain(self) -> Result<FinancialYear, PersistenceError> {
        Ok(FinancialYear {
            id: FinancialYearId::new(self.financial_year_id),
            name: self.name,
            start: decode_timestamp(&self.start_at)?,
            end: decode_timestamp(&self.end_at)?,
        })
    }
}

/// Retrieves a financial year by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the financial year is not found.
pub fn get_financial_year(
    conn: &mut SqliteConnection,
    financial_year_id: FinancialYearId,
) -> Result<Option<FinancialYear>, PersistenceError> {
    financial_years::table
        .filter(financial_years::financial_year_id.eq(financial_year_id.value()))
        .select(FinancialYearRow::as_select())
        .first(conn)
        .optional()?
        .map(FinancialYearRow::into_domain)
        .transpose()
}

/// Lists every financial year, earliest start first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_financial_years(
    conn: &mut SqliteConnection,
) -> Result<Vec<FinancialYear>, PersistenceError> {
    financial_years::table
        .select(FinancialYearRow::as_select())
        .order(financial_years::start_at.asc())
        .load::<FinancialYearRow>(conn)?
        .into_iter()
        .map(FinancialYearRow::into_domain)
        .collect()
}
