// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::FinancialYearId;
use time::OffsetDateTime;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::financial_years;
use crate::encoding::encode_timestamp;
use crate::error::PersistenceError;

/// Creates a financial year.
///
/// Overlap checks happen before this is called.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_financial_year(
    conn: &mut SqliteConnection,
    name: &str,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Result<FinancialYearId, PersistenceError> {
    info!(name, %start, %end, "Creating financial year");

    diesel::insert_into(financial_years::table)
        .values((
            financial_years::name.eq(name.trim()),
            financial_years::start_at.eq(encode_timestamp(start)?),
            financial_years::end_at.eq(encode_timestamp(end)?),
        ))
        .execute(conn)?;

    Ok(FinancialYearId::new(get_last_insert_rowid(conn)?))
}
